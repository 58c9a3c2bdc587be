use serde::{Deserialize, Serialize};

/// One filled questionnaire. Ephemeral — rendered into a prompt and
/// discarded; nothing here is persisted.
///
/// Wire names are camelCase, matching the frontend form. Every field
/// defaults to empty so a partial body still decodes; validation reports
/// the gaps field by field instead of failing at the serde layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireResponse {
    pub age: u32,
    pub sexe: String,
    pub localite: String,
    pub langues: Vec<String>,
    pub niveau_etude: String,
    pub filiere: String,
    /// Self-rating in sciences: "Faible", "Moyen" ou "Élevé".
    pub matieres_sci: String,
    /// Self-rating in literature, same scale.
    pub matieres_litt: String,
    pub situation_actuelle: String,
    pub matieres_pref: Vec<String>,
    pub activites_pref: Vec<String>,
    pub travail_pref: String,
    pub aimer_faire: Vec<String>,
    pub type_travail: String,
    /// "Oui" ou "Non" — gates `metier_precis`.
    pub metier_en_tete: String,
    pub metier_precis: String,
    pub motivation: String,
    pub entrepreneuriat: String,
    pub smartphone: String,
    pub internet: String,
    pub activite_parents: String,
    pub apprentissage: Vec<String>,
    pub competence_exist: String,
}

/// Success envelope of POST /api/orientation: the generated text,
/// wrapped in a one-element array for the existing frontend.
#[derive(Debug, Serialize)]
pub struct OrientationResponse {
    pub data: Vec<String>,
}
