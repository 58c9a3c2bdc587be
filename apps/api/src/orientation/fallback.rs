//! Deterministic fallback recommendation engine.
//!
//! Answers when the LLM is unavailable or fails. Pure function over the
//! questionnaire: a fixed decision table picks the school track, an
//! overlay keyed on preferred activities may replace the profession list,
//! and the result renders as the same multi-section French text the LLM
//! path produces.

use crate::orientation::models::QuestionnaireResponse;

/// Rating value that marks a dominant aptitude.
const HIGH: &str = "Élevé";

/// The professions section never lists more than this many entries.
const MAX_PROFESSIONS: usize = 4;

/// Track + profession base list, first match wins.
fn base_recommendation(q: &QuestionnaireResponse) -> (&'static str, &'static [&'static str]) {
    if q.matieres_sci == HIGH {
        (
            "Série D (Sciences expérimentales)",
            &["Médecin", "Ingénieur", "Pharmacien", "Vétérinaire"],
        )
    } else if q.matieres_litt == HIGH {
        (
            "Série L (Littéraire)",
            &["Professeur", "Journaliste", "Avocat", "Traducteur"],
        )
    } else {
        (
            "Série C (Mathématiques)",
            &["Comptable", "Informaticien", "Banquier", "Statisticien"],
        )
    }
}

/// Overlay on the profession list only — the track is never touched.
/// At most one rule fires, in this fixed order.
fn activity_overlay(q: &QuestionnaireResponse) -> Option<&'static [&'static str]> {
    let likes = |activity: &str| q.aimer_faire.iter().any(|a| a == activity);

    if likes("Soigner") {
        Some(&["Médecin", "Infirmier", "Pharmacien", "Kinésithérapeute"])
    } else if likes("Enseigner") {
        Some(&["Professeur", "Formateur", "Éducateur", "Directeur d'école"])
    } else if likes("Créer") {
        Some(&["Designer", "Architecte", "Artiste", "Développeur"])
    } else {
        None
    }
}

/// Generates the fallback recommendation text. Same input, same output —
/// no I/O, no randomness, no hidden state.
pub fn generate_fallback_recommendation(q: &QuestionnaireResponse) -> String {
    let (track, base_professions) = base_recommendation(q);
    let professions = activity_overlay(q).unwrap_or(base_professions);

    let profession_lines = professions
        .iter()
        .take(MAX_PROFESSIONS)
        .map(|p| format!("• {p}"))
        .collect::<Vec<_>>()
        .join("\n");

    let aptitude = if q.matieres_sci == HIGH {
        q.matieres_sci.to_lowercase()
    } else if q.matieres_litt == HIGH {
        "littérature".to_string()
    } else {
        "mathématiques".to_string()
    };

    let preferred_subjects = if q.matieres_pref.is_empty() {
        "les études".to_string()
    } else {
        q.matieres_pref
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let first_subject = q
        .matieres_pref
        .first()
        .map(String::as_str)
        .unwrap_or("sciences");

    let tip = if q.entrepreneuriat == "Oui" {
        "Votre intérêt pour l'entrepreneuriat est un atout ! Considérez des formations en gestion d'entreprise."
    } else {
        "N'hésitez pas à explorer l'entrepreneuriat, c'est une excellente voie au Togo !"
    };

    format!(
        "🎯 **Recommandation personnalisée YVA**\n\
        \n\
        Bonjour ! Basé sur votre profil, voici ma recommandation :\n\
        \n\
        **🎓 Orientation scolaire recommandée :**\n\
        {track}\n\
        \n\
        **💼 Métiers adaptés à votre profil :**\n\
        {profession_lines}\n\
        \n\
        **🌟 Pourquoi cette recommandation ?**\n\
        Vos compétences en {aptitude} et votre intérêt pour {preferred_subjects} montrent une affinité naturelle pour ce domaine.\n\
        \n\
        **📚 Prochaines étapes avec YVA :**\n\
        ✅ Explorez nos mini-formations en {first_subject}\n\
        ✅ Renforcez vos compétences avec nos modules pratiques\n\
        ✅ Découvrez les opportunités au Togo dans votre région ({localite})\n\
        \n\
        **💡 Conseil spécial :**\n\
        {tip}\n\
        \n\
        Bonne chance dans votre parcours ! 🚀",
        localite = q.localite,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questionnaire() -> QuestionnaireResponse {
        QuestionnaireResponse {
            localite: "Kara".to_string(),
            matieres_pref: vec!["Physique".to_string(), "SVT".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_high_science_always_serie_d() {
        let mut q = questionnaire();
        q.matieres_sci = "Élevé".to_string();
        // Other fields must not influence the track
        q.matieres_litt = "Élevé".to_string();
        q.aimer_faire = vec!["Enseigner".to_string()];
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("Série D (Sciences expérimentales)"));
    }

    #[test]
    fn test_high_literature_without_science_serie_l() {
        let mut q = questionnaire();
        q.matieres_sci = "Faible".to_string();
        q.matieres_litt = "Élevé".to_string();
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("Série L (Littéraire)"));
        // No overlay fires — the base list stands
        assert!(text.contains("• Professeur"));
        assert!(text.contains("• Journaliste"));
        assert!(text.contains("• Avocat"));
        assert!(text.contains("• Traducteur"));
    }

    #[test]
    fn test_neither_high_defaults_to_serie_c() {
        let mut q = questionnaire();
        q.matieres_sci = "Moyen".to_string();
        q.matieres_litt = "Faible".to_string();
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("Série C (Mathématiques)"));
        assert!(text.contains("• Comptable"));
    }

    #[test]
    fn test_overlay_replaces_professions_but_not_track() {
        let mut q = questionnaire();
        q.matieres_sci = "Élevé".to_string();
        q.aimer_faire = vec!["Soigner".to_string()];
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("Série D (Sciences expérimentales)"));
        assert!(text.contains("• Médecin"));
        assert!(text.contains("• Infirmier"));
        assert!(text.contains("• Pharmacien"));
        assert!(text.contains("• Kinésithérapeute"));
        // Base-only entries are gone
        assert!(!text.contains("• Ingénieur"));
        assert!(!text.contains("• Vétérinaire"));
    }

    #[test]
    fn test_only_first_overlay_rule_fires() {
        let mut q = questionnaire();
        q.aimer_faire = vec!["Créer".to_string(), "Soigner".to_string()];
        let text = generate_fallback_recommendation(&q);
        // "Soigner" wins regardless of order in the answer set
        assert!(text.contains("• Kinésithérapeute"));
        assert!(!text.contains("• Designer"));
    }

    #[test]
    fn test_creer_overlay() {
        let mut q = questionnaire();
        q.aimer_faire = vec!["Créer".to_string()];
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("• Designer"));
        assert!(text.contains("• Développeur"));
    }

    #[test]
    fn test_enseigner_overlay() {
        let mut q = questionnaire();
        q.aimer_faire = vec!["Enseigner".to_string()];
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("• Directeur d'école"));
    }

    #[test]
    fn test_professions_truncated_at_four() {
        let q = questionnaire();
        let text = generate_fallback_recommendation(&q);
        let bullet_count = text.matches("• ").count();
        assert_eq!(bullet_count, 4);
    }

    #[test]
    fn test_pure_function_identical_output() {
        let mut q = questionnaire();
        q.matieres_sci = "Élevé".to_string();
        q.aimer_faire = vec!["Soigner".to_string()];
        assert_eq!(
            generate_fallback_recommendation(&q),
            generate_fallback_recommendation(&q)
        );
    }

    #[test]
    fn test_empty_preferred_subjects_substitute() {
        let mut q = questionnaire();
        q.matieres_pref.clear();
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("votre intérêt pour les études"));
        assert!(text.contains("mini-formations en sciences"));
    }

    #[test]
    fn test_justification_uses_first_two_subjects() {
        let mut q = questionnaire();
        q.matieres_pref = vec![
            "Physique".to_string(),
            "SVT".to_string(),
            "Chimie".to_string(),
        ];
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("votre intérêt pour Physique, SVT montrent"));
        assert!(!text.contains("Chimie"));
    }

    #[test]
    fn test_locality_appears_in_next_steps() {
        let q = questionnaire();
        let text = generate_fallback_recommendation(&q);
        assert!(text.contains("dans votre région (Kara)"));
    }

    #[test]
    fn test_entrepreneurship_tip_variants() {
        let mut q = questionnaire();
        q.entrepreneuriat = "Oui".to_string();
        let with = generate_fallback_recommendation(&q);
        assert!(with.contains("Votre intérêt pour l'entrepreneuriat est un atout !"));

        q.entrepreneuriat = "Non".to_string();
        let without = generate_fallback_recommendation(&q);
        assert!(without.contains("N'hésitez pas à explorer l'entrepreneuriat"));
    }

    #[test]
    fn test_empty_questionnaire_still_produces_text() {
        let text = generate_fallback_recommendation(&QuestionnaireResponse::default());
        assert!(text.contains("Série C (Mathématiques)"));
        assert!(text.contains("Bonne chance dans votre parcours !"));
    }
}
