// src/noyau/parentheses.rs
//
// Suivi des parenthèses.
// Le solde est TOUJOURS recalculé depuis le texte complet (jamais mis à jour
// par deltas) : aucune dérive possible avec des éditions à position arbitraire.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EtatParentheses {
    Equilibre,
    FermantesManquantes(usize),
    /// Possible seulement après suppression d’une `(` déjà fermée.
    FermantesEnTrop(usize),
}

impl EtatParentheses {
    /// Nombre de `)` synthétiques à ajouter pour l’aperçu / la validation.
    pub fn fermantes_manquantes(self) -> usize {
        match self {
            EtatParentheses::FermantesManquantes(n) => n,
            _ => 0,
        }
    }

    pub fn est_equilibre(self) -> bool {
        self == EtatParentheses::Equilibre
    }
}

impl fmt::Display for EtatParentheses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtatParentheses::Equilibre => write!(f, "✓ parenthèses équilibrées"),
            EtatParentheses::FermantesManquantes(n) => write!(f, "⚠ {n} parenthèse(s) à fermer"),
            EtatParentheses::FermantesEnTrop(n) => write!(f, "⚠ {n} parenthèse(s) en trop"),
        }
    }
}

/// count('(') - count(')')
pub fn solde(texte: &str) -> isize {
    texte.chars().fold(0isize, |acc, c| match c {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}

pub fn etat(texte: &str) -> EtatParentheses {
    let s = solde(texte);
    match s {
        0 => EtatParentheses::Equilibre,
        s if s > 0 => EtatParentheses::FermantesManquantes(s.unsigned_abs()),
        s => EtatParentheses::FermantesEnTrop(s.unsigned_abs()),
    }
}
