//! Taxonomie fermée des erreurs d’évaluation.
//!
//! Chaque échec du pipeline est une valeur typée, produite directement par
//! l’évaluateur (jamais déduite après coup d’un message texte).
//! `Display` donne l’étiquette courte affichée par la vue.

use thiserror::Error;

/// Sens d’un déséquilibre de parenthèses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sens {
    /// Plus de `(` que de `)` : il manque des fermantes.
    ExcesOuvrantes,
    /// Plus de `)` que de `(`.
    ExcesFermantes,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("Parenthèses vides")]
    ParenthesesVides,

    #[error("Opérateurs consécutifs")]
    OperateursConsecutifs,

    #[error("{}", libelle_parentheses(.sens, .nombre))]
    ParenthesesDesequilibrees { sens: Sens, nombre: usize },

    #[error("Division par zéro")]
    DivisionParZero,

    #[error("Résultat complexe")]
    ResultatComplexe,

    #[error("Hors domaine")]
    HorsDomaine,

    #[error("Résultat hors limites")]
    HorsLimites,

    #[error("Expression invalide")]
    ExpressionInvalide,
}

impl ErreurEval {
    /// Erreur récupérable : le tampon est conservé lors d’une validation.
    pub fn est_parentheses(&self) -> bool {
        matches!(self, ErreurEval::ParenthesesDesequilibrees { .. })
    }
}

fn libelle_parentheses(sens: &Sens, nombre: &usize) -> String {
    match sens {
        Sens::ExcesOuvrantes => format!("Ajouter {nombre} parenthèse(s)"),
        Sens::ExcesFermantes => format!("{nombre} parenthèse(s) en trop"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn libelles_courts() {
        assert_eq!(ErreurEval::DivisionParZero.to_string(), "Division par zéro");
        assert_eq!(
            ErreurEval::ParenthesesDesequilibrees {
                sens: Sens::ExcesOuvrantes,
                nombre: 2
            }
            .to_string(),
            "Ajouter 2 parenthèse(s)"
        );
        assert_eq!(
            ErreurEval::ParenthesesDesequilibrees {
                sens: Sens::ExcesFermantes,
                nombre: 1
            }
            .to_string(),
            "1 parenthèse(s) en trop"
        );
    }

    #[test]
    fn seules_les_parentheses_sont_recuperables() {
        assert!(ErreurEval::ParenthesesDesequilibrees {
            sens: Sens::ExcesFermantes,
            nombre: 1
        }
        .est_parentheses());
        assert!(!ErreurEval::ParenthesesVides.est_parentheses());
        assert!(!ErreurEval::ExpressionInvalide.est_parentheses());
    }
}
