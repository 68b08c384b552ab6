//! Noyau : évaluation (pipeline réel)
//!
//! contrôles statiques -> jetons -> RPN -> Expr -> valeur
//!
//! Contrôles statiques sur le texte, avant toute tokenisation
//! (échec immédiat, dans cet ordre) :
//! - parenthèses déséquilibrées
//! - parenthèses vides "()"
//! - opérateurs consécutifs (un `-` de signe après un opérateur est permis)
//!
//! L’entrée est un texte DÉJÀ normalisé (voir normalise.rs).

use super::erreur::{ErreurEval, Sens};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalise;
use super::parentheses::{self, solde};
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue un texte normalisé.
pub fn evaluer(texte: &str) -> Result<f64, ErreurEval> {
    let expr = analyser(texte)?;
    expr.evaluer()
}

/// Contrôles statiques + jetons + RPN -> AST.
fn analyser(texte: &str) -> Result<Expr, ErreurEval> {
    verifier_parentheses(texte)?;
    verifier_operateurs(texte)?;

    let jetons = tokenize(texte)?;

    let rpn = to_rpn(&jetons)?;
    from_rpn(&rpn)
}

fn verifier_parentheses(texte: &str) -> Result<(), ErreurEval> {
    let s = solde(texte);
    if s != 0 {
        let sens = if s > 0 {
            Sens::ExcesOuvrantes
        } else {
            Sens::ExcesFermantes
        };
        return Err(ErreurEval::ParenthesesDesequilibrees {
            sens,
            nombre: s.unsigned_abs(),
        });
    }

    let compact: String = texte.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.contains("()") {
        return Err(ErreurEval::ParenthesesVides);
    }

    Ok(())
}

/// Deux opérateurs binaires adjacents ("2+*3", "2//3") sont refusés.
/// `**` collé est un seul opérateur ; un `-` en seconde position est un signe
/// ("3+-5", "2**-1"). Les espaces séparent mais ne comptent pas.
fn verifier_operateurs(texte: &str) -> Result<(), ErreurEval> {
    let chars: Vec<char> = texte.chars().collect();
    let mut apres_operateur = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if c.is_whitespace() {
            continue;
        }
        if !matches!(c, '+' | '-' | '*' | '/' | '%' | '^') {
            apres_operateur = false;
            continue;
        }
        if c == '*' && chars.get(i) == Some(&'*') {
            i += 1;
        }
        if apres_operateur && c != '-' {
            return Err(ErreurEval::OperateursConsecutifs);
        }
        apres_operateur = true;
    }

    Ok(())
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Démarche (panneau d’explication) pour un texte BRUT du tampon :
/// normalisation + fermantes synthétiques, puis chaque étape tant qu’elle réussit.
pub fn demarche(brut: &str) -> Demarche {
    let manque = parentheses::etat(brut).fermantes_manquantes();
    let normalisee = normalise(brut) + &")".repeat(manque);

    let mut d = Demarche {
        normalisee,
        ..Default::default()
    };

    let Ok(jetons) = tokenize(&d.normalisee) else {
        return d;
    };
    d.jetons = format_tokens(&jetons);

    let Ok(rpn) = to_rpn(&jetons) else {
        return d;
    };
    d.rpn = format_tokens(&rpn);

    if let Ok(expr) = from_rpn(&rpn) {
        d.arbre = expr.to_string();
    }

    d
}
