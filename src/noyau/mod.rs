//! Noyau : édition + évaluation d’expressions
//!
//! Organisation interne :
//! - normalise.rs   : écriture utilisateur -> syntaxe canonique (2(3) -> 2*(3), ^ -> **)
//! - parentheses.rs : solde des parenthèses, recalculé depuis le texte
//! - jetons.rs      : tokenisation + table fermée fonctions/constantes
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST + interprète (erreurs typées)
//! - erreur.rs      : taxonomie des erreurs
//! - eval.rs        : pipeline complet + démarche
//! - format.rs      : affichage des résultats
//! - tampon.rs      : texte + curseur, commandes d’édition
//! - historique.rs  : 3 dernières validations
//! - session.rs     : tampon + historique, aperçu / validation

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod normalise;
pub mod parentheses;
pub mod rpn;
pub mod session;
pub mod tampon;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use session::{Apercu, Instantane, Session};
