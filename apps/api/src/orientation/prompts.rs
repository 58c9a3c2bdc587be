//! Prompt constants and rendering for the orientation LLM call.

use crate::orientation::models::QuestionnaireResponse;

/// Rendered in place of an empty set-valued or optional answer — the
/// outbound prompt always carries all 23 fields, never fewer.
const EMPTY_ANSWER: &str = "Aucune";

/// Instructional template. Replace `{user_data}` before sending.
pub const ORIENTATION_PROMPT_TEMPLATE: &str = r#"Tu es YVA, un assistant virtuel pour les jeunes Togolais de 12 à 25 ans. Ta mission est de leur proposer une orientation scolaire ou professionnelle ultra-contextualisée au Togo uniquement.

Consignes importantes :
- Réponds en français, de manière structurée, claire et bien lisible.
- Utilise uniquement des filières, métiers, institutions, formations et ressources disponibles au Togo.
- Quand tu proposes des formations, commence toujours par suggérer les mini-formations proposées par YVA dans le domaine recommandé. C'est la priorité. Ensuite, tu peux compléter avec d'autres alternatives locales disponibles au Togo (exemple : ANPE Togo, centres de formation, chambres de métiers, dispositifs communaux...).
- Le ton doit être bienveillant, motivant, simple et adapté aux réalités locales (connexion Internet limitée, zones rurales, contexte économique togolais...).
- Aucun service étranger, aucune école internationale, aucune plateforme non disponible au Togo. Jamais.
- Termine par une phrase de motivation courte, percutante et liée à la jeunesse togolaise.

Voici les données du jeune :
{user_data}

Structure ta réponse de la manière suivante :

1. Profil résumé
Décris le jeune en 3 ou 4 phrases : qui il ou elle est, ses préférences, ses forces et son contexte.

2. Suggestion de filière ou métier
Propose un métier ou une filière (avec un mot en gras) qui correspond à son profil, avec une explication claire du lien avec ses réponses.

3. Pourquoi ce choix
Explique de façon simple et directe pourquoi ce choix est pertinent pour lui ou elle, en te basant sur ses réponses et son contexte.

4. Mini-formations ou services disponibles au Togo
- Commence toujours par les mini-formations proposées par YVA dans le domaine recommandé.
- Ensuite, propose deux autres alternatives locales accessibles au Togo, comme des centres de formation professionnelle, des dispositifs gouvernementaux (ANPE, chambres de métiers, appui communal, associations locales...).
- Les suggestions doivent être pratiques, accessibles, réalistes et faisables au Togo, en tenant compte de l'accès au smartphone, à Internet ou aux formations en présentiel.

5. Message de motivation
Termine avec une phrase motivante, simple, chaleureuse et ancrée dans le contexte de la jeunesse togolaise.

Important : Sois bref, efficace, motivant et 100 % ancré dans le Togo."#;

fn join_or_empty(values: &[String]) -> String {
    if values.is_empty() {
        EMPTY_ANSWER.to_string()
    } else {
        values.join(", ")
    }
}

fn text_or_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_ANSWER
    } else {
        value
    }
}

/// Renders the questionnaire as the French key-value block embedded in the
/// prompt. All 23 fields appear, in the questionnaire's order.
pub fn render_user_data(q: &QuestionnaireResponse) -> String {
    // The profession line is intentionally blank unless one is in mind.
    let metier = if q.metier_en_tete == "Oui" {
        q.metier_precis.as_str()
    } else {
        ""
    };

    let lines: Vec<(&str, String)> = vec![
        ("Âge", q.age.to_string()),
        ("Sexe", q.sexe.clone()),
        ("Localité", q.localite.clone()),
        ("Langue parlée", join_or_empty(&q.langues)),
        ("Niveau d'étude actuel", q.niveau_etude.clone()),
        ("Filière suivie", q.filiere.clone()),
        ("Matières scientifiques", q.matieres_sci.clone()),
        ("Matières littéraires", q.matieres_litt.clone()),
        ("Tu es actuellement", q.situation_actuelle.clone()),
        ("Matière(s) préférée(s)", join_or_empty(&q.matieres_pref)),
        ("Activité(s) préférée(s)", join_or_empty(&q.activites_pref)),
        ("Préfères-tu travailler", q.travail_pref.clone()),
        ("Tu aimes", join_or_empty(&q.aimer_faire)),
        ("Type de travail qui t'attire", q.type_travail.clone()),
        ("As-tu un métier en tête ?", q.metier_en_tete.clone()),
        ("Métier", metier.to_string()),
        ("Tu veux", q.motivation.clone()),
        (
            "Es-tu intéressé(e) par l'entrepreneuriat ?",
            q.entrepreneuriat.clone(),
        ),
        ("Accès à un smartphone", q.smartphone.clone()),
        ("Accès internet régulier ?", q.internet.clone()),
        ("Activité des parents", q.activite_parents.clone()),
        ("Tu apprends mieux en", join_or_empty(&q.apprentissage)),
        (
            "As-tu déjà une compétence ?",
            text_or_empty(&q.competence_exist).to_string(),
        ),
    ];

    lines
        .into_iter()
        .map(|(label, value)| format!("- {label} : {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full prompt sent to the LLM.
pub fn build_prompt(q: &QuestionnaireResponse) -> String {
    ORIENTATION_PROMPT_TEMPLATE.replace("{user_data}", &render_user_data(q))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_23_fields_render() {
        let block = render_user_data(&QuestionnaireResponse::default());
        assert_eq!(block.lines().count(), 23);
    }

    #[test]
    fn test_empty_sets_render_sentinel_not_dropped() {
        let block = render_user_data(&QuestionnaireResponse::default());
        assert!(block.contains("- Langue parlée : Aucune"));
        assert!(block.contains("- Matière(s) préférée(s) : Aucune"));
        assert!(block.contains("- Tu apprends mieux en : Aucune"));
        assert!(block.contains("- As-tu déjà une compétence ? : Aucune"));
    }

    #[test]
    fn test_sets_join_with_comma() {
        let q = QuestionnaireResponse {
            langues: vec!["Français".to_string(), "Kabiyè".to_string()],
            ..Default::default()
        };
        let block = render_user_data(&q);
        assert!(block.contains("- Langue parlée : Français, Kabiyè"));
    }

    #[test]
    fn test_metier_blank_unless_in_mind() {
        let mut q = QuestionnaireResponse {
            metier_en_tete: "Non".to_string(),
            metier_precis: "Pilote".to_string(),
            ..Default::default()
        };
        assert!(render_user_data(&q).contains("- Métier : \n"));

        q.metier_en_tete = "Oui".to_string();
        assert!(render_user_data(&q).contains("- Métier : Pilote"));
    }

    #[test]
    fn test_build_prompt_embeds_user_data() {
        let q = QuestionnaireResponse {
            localite: "Sokodé".to_string(),
            ..Default::default()
        };
        let prompt = build_prompt(&q);
        assert!(prompt.contains("- Localité : Sokodé"));
        assert!(!prompt.contains("{user_data}"));
        assert!(prompt.starts_with("Tu es YVA"));
    }
}
