//! Field-by-field questionnaire validation.
//!
//! The legacy contract shipped the answers as a 23-element positional
//! list; here the body is named and every rule reports its own French
//! message, all collected before answering.

use crate::orientation::models::QuestionnaireResponse;

const MIN_AGE: u32 = 12;
const MAX_AGE: u32 = 25;

/// Validates a questionnaire, collecting every violation.
/// An empty Vec means the record is ready to be sent to the LLM.
pub fn validate(q: &QuestionnaireResponse) -> Vec<String> {
    let mut errors = Vec::new();

    if q.age < MIN_AGE || q.age > MAX_AGE {
        errors.push("L'âge doit être entre 12 et 25 ans".to_string());
    }
    if q.localite.trim().is_empty() {
        errors.push("La localité est obligatoire".to_string());
    }
    if q.langues.is_empty() {
        errors.push("Au moins une langue est obligatoire".to_string());
    }
    if q.niveau_etude.trim().is_empty() {
        errors.push("Le niveau d'étude est obligatoire".to_string());
    }
    if q.matieres_sci.trim().is_empty() {
        errors.push("Le niveau en sciences est obligatoire".to_string());
    }
    if q.matieres_litt.trim().is_empty() {
        errors.push("Le niveau en littérature est obligatoire".to_string());
    }
    if q.situation_actuelle.trim().is_empty() {
        errors.push("La situation actuelle est obligatoire".to_string());
    }
    if q.matieres_pref.is_empty() {
        errors.push("Au moins une matière préférée est obligatoire".to_string());
    }
    if q.activites_pref.is_empty() {
        errors.push("Au moins une activité préférée est obligatoire".to_string());
    }
    if q.travail_pref.trim().is_empty() {
        errors.push("La préférence de travail est obligatoire".to_string());
    }
    if q.aimer_faire.is_empty() {
        errors.push("Au moins une chose aimée est obligatoire".to_string());
    }
    if q.type_travail.trim().is_empty() {
        errors.push("Le type de travail est obligatoire".to_string());
    }
    if q.metier_en_tete.trim().is_empty() {
        errors.push("L'indication métier en tête est obligatoire".to_string());
    }
    if q.motivation.trim().is_empty() {
        errors.push("La motivation est obligatoire".to_string());
    }
    if q.entrepreneuriat.trim().is_empty() {
        errors.push("L'intérêt entrepreneuriat est obligatoire".to_string());
    }
    if q.smartphone.trim().is_empty() {
        errors.push("L'accès smartphone est obligatoire".to_string());
    }
    if q.internet.trim().is_empty() {
        errors.push("L'accès internet est obligatoire".to_string());
    }
    if q.activite_parents.trim().is_empty() {
        errors.push("L'activité des parents est obligatoire".to_string());
    }
    if q.apprentissage.is_empty() {
        errors.push("Au moins un style d'apprentissage est obligatoire".to_string());
    }

    // metier_precis is only meaningful when a profession is already in mind
    if q.metier_en_tete == "Oui" && q.metier_precis.trim().is_empty() {
        errors.push("Veuillez préciser le métier".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_questionnaire() -> QuestionnaireResponse {
        QuestionnaireResponse {
            age: 17,
            sexe: "Féminin".to_string(),
            localite: "Lomé".to_string(),
            langues: vec!["Français".to_string(), "Éwé".to_string()],
            niveau_etude: "Seconde".to_string(),
            filiere: "Générale".to_string(),
            matieres_sci: "Élevé".to_string(),
            matieres_litt: "Moyen".to_string(),
            situation_actuelle: "Élève".to_string(),
            matieres_pref: vec!["Mathématiques".to_string()],
            activites_pref: vec!["Lire".to_string()],
            travail_pref: "En équipe".to_string(),
            aimer_faire: vec!["Créer".to_string()],
            type_travail: "Bureau".to_string(),
            metier_en_tete: "Non".to_string(),
            metier_precis: String::new(),
            motivation: "Aider ma communauté".to_string(),
            entrepreneuriat: "Oui".to_string(),
            smartphone: "Oui".to_string(),
            internet: "Non".to_string(),
            activite_parents: "Agriculture".to_string(),
            apprentissage: vec!["Pratiquant".to_string()],
            competence_exist: String::new(),
        }
    }

    #[test]
    fn test_complete_questionnaire_passes() {
        assert!(validate(&complete_questionnaire()).is_empty());
    }

    #[test]
    fn test_age_below_range() {
        let mut q = complete_questionnaire();
        q.age = 11;
        let errors = validate(&q);
        assert_eq!(errors, vec!["L'âge doit être entre 12 et 25 ans"]);
    }

    #[test]
    fn test_age_above_range() {
        let mut q = complete_questionnaire();
        q.age = 26;
        assert!(!validate(&q).is_empty());
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let mut q = complete_questionnaire();
        q.age = 12;
        assert!(validate(&q).is_empty());
        q.age = 25;
        assert!(validate(&q).is_empty());
    }

    #[test]
    fn test_missing_locality() {
        let mut q = complete_questionnaire();
        q.localite = "  ".to_string();
        assert_eq!(validate(&q), vec!["La localité est obligatoire"]);
    }

    #[test]
    fn test_empty_sets_are_reported() {
        let mut q = complete_questionnaire();
        q.langues.clear();
        q.matieres_pref.clear();
        q.aimer_faire.clear();
        let errors = validate(&q);
        assert!(errors.contains(&"Au moins une langue est obligatoire".to_string()));
        assert!(errors.contains(&"Au moins une matière préférée est obligatoire".to_string()));
        assert!(errors.contains(&"Au moins une chose aimée est obligatoire".to_string()));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_metier_precis_required_when_oui() {
        let mut q = complete_questionnaire();
        q.metier_en_tete = "Oui".to_string();
        assert_eq!(validate(&q), vec!["Veuillez préciser le métier"]);

        q.metier_precis = "Médecin".to_string();
        assert!(validate(&q).is_empty());
    }

    #[test]
    fn test_metier_precis_ignored_when_non() {
        let mut q = complete_questionnaire();
        q.metier_en_tete = "Non".to_string();
        q.metier_precis = String::new();
        assert!(validate(&q).is_empty());
    }

    #[test]
    fn test_default_questionnaire_fires_every_required_rule() {
        let errors = validate(&QuestionnaireResponse::default());
        assert_eq!(errors.len(), 19);
        assert!(errors.contains(&"L'âge doit être entre 12 et 25 ans".to_string()));
        assert!(errors.contains(&"La localité est obligatoire".to_string()));
        assert!(errors.contains(&"Au moins un style d'apprentissage est obligatoire".to_string()));

        // sexe, filiere and competence_exist are optional answers
        assert!(!errors.iter().any(|e| e.contains("sexe") || e.contains("Sexe")));
        assert!(!errors.iter().any(|e| e.contains("filière") || e.contains("Filière")));
        assert!(!errors.iter().any(|e| e.contains("compétence")));

        // the metier_precis gate stays closed while metier_en_tete is blank
        assert!(!errors.contains(&"Veuillez préciser le métier".to_string()));
    }
}
