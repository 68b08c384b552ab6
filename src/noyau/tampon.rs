//! src/noyau/tampon.rs
//!
//! Tampon d’expression adressable par curseur.
//!
//! Contrats :
//! - `0 <= curseur <= len` après CHAQUE opération, réussie ou non.
//! - Le curseur compte des caractères (π, ℯ, √ valent 1), jamais des octets.
//! - Aucune évaluation ici : uniquement l’édition du texte.
//! - Le solde des parenthèses est relu depuis le texte à chaque décision.

use super::jetons::Fonction;
use super::normalise::finit_par_valeur;
use super::parentheses::{self, EtatParentheses};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tampon {
    chars: Vec<char>,
    curseur: usize,
}

impl Tampon {
    pub fn texte(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn curseur(&self) -> usize {
        self.curseur
    }

    pub fn parentheses(&self) -> EtatParentheses {
        parentheses::etat(&self.texte())
    }

    /* ------------------------ Insertion ------------------------ */

    /// Insère `texte` au curseur. Retourne false si rien n’a été inséré.
    ///
    /// - "(" après une valeur : "*(" (multiplication implicite)
    /// - ")" sans parenthèse ouverte à fermer : refusé
    pub fn inserer(&mut self, texte: &str) -> bool {
        if texte.is_empty() {
            return false;
        }

        if texte == ")" && parentheses::solde(&self.texte()) <= 0 {
            return false;
        }

        if texte == "(" && self.precede_valeur() {
            self.coller("*(");
        } else {
            self.coller(texte);
        }
        true
    }

    /// "sin(" etc., avec la même règle de multiplication implicite que "(".
    pub fn inserer_fonction(&mut self, f: Fonction) {
        if self.precede_valeur() {
            self.coller("*");
        }
        self.coller(f.nom());
        self.coller("(");
    }

    /// x² / x³ : "^n" seulement derrière une valeur.
    pub fn puissance(&mut self, n: u32) -> bool {
        if !self.precede_valeur() {
            return false;
        }
        self.coller(&format!("^{n}"));
        true
    }

    /// 1/x : ouvre "1/(" au curseur.
    pub fn inverse(&mut self) {
        if self.precede_valeur() {
            self.coller("*");
        }
        self.coller("1/(");
    }

    fn coller(&mut self, s: &str) {
        let n = s.chars().count();
        self.chars.splice(self.curseur..self.curseur, s.chars());
        self.curseur += n;
    }

    fn precede_valeur(&self) -> bool {
        let avant: String = self.chars[..self.curseur].iter().collect();
        finit_par_valeur(&avant)
    }

    /* ------------------------ Suppression ------------------------ */

    pub fn effacer_avant(&mut self) -> bool {
        if self.curseur == 0 {
            return false;
        }
        self.chars.remove(self.curseur - 1);
        self.curseur -= 1;
        true
    }

    pub fn effacer_apres(&mut self) -> bool {
        if self.curseur >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.curseur);
        true
    }

    pub fn vider(&mut self) {
        self.chars.clear();
        self.curseur = 0;
    }

    /// Remplace tout le contenu ; curseur en fin.
    pub fn remplacer(&mut self, texte: &str) {
        self.chars = texte.chars().collect();
        self.curseur = self.chars.len();
    }

    /* ------------------------ Curseur ------------------------ */

    /// Déplacement relatif, borné à [0, len].
    pub fn deplacer(&mut self, delta: isize) {
        self.curseur = self
            .curseur
            .saturating_add_signed(delta)
            .min(self.chars.len());
    }

    pub fn debut(&mut self) {
        self.curseur = 0;
    }

    pub fn fin(&mut self) {
        self.curseur = self.chars.len();
    }

    /* ------------------------ ± ------------------------ */

    /// Bascule le signe du nombre qui finit au curseur ; sinon :
    /// - curseur en 0            : "-" devant tout
    /// - en fin, après ")"       : "-( … )" autour de tout
    /// - ailleurs                : "-" inséré normalement
    pub fn negation(&mut self) {
        if let Some((debut, signe)) = self.nombre_avant_curseur() {
            if signe {
                self.chars.remove(debut);
                self.curseur -= 1;
            } else {
                self.chars.insert(debut, '-');
                self.curseur += 1;
            }
            return;
        }

        if self.curseur == 0 {
            self.chars.insert(0, '-');
            self.curseur = 1;
            return;
        }

        if self.curseur == self.chars.len() && self.chars.last() == Some(&')') {
            let mut tout = Vec::with_capacity(self.chars.len() + 3);
            tout.extend(['-', '(']);
            tout.append(&mut self.chars);
            tout.push(')');
            self.chars = tout;
            self.curseur = self.chars.len();
            return;
        }

        self.inserer("-");
    }

    /// Nombre (chiffres + au plus un point) finissant exactement au curseur.
    /// Retourne (début, signe) où `signe` indique un "-" de signe en tête
    /// (en début de texte, ou après un opérateur ou une "(").
    fn nombre_avant_curseur(&self) -> Option<(usize, bool)> {
        let mut i = self.curseur;
        while i > 0 && (self.chars[i - 1].is_ascii_digit() || self.chars[i - 1] == '.') {
            i -= 1;
        }

        let corps = &self.chars[i..self.curseur];
        let points = corps.iter().filter(|c| **c == '.').count();
        if points > 1 || !corps.iter().any(|c| c.is_ascii_digit()) {
            return None;
        }

        // "log10" : chiffres d’un identifiant, pas un nombre
        if i > 0 && (self.chars[i - 1].is_ascii_alphabetic() || self.chars[i - 1] == '_') {
            return None;
        }

        if i > 0 && self.chars[i - 1] == '-' {
            let signe = i == 1 || avant_un_signe(self.chars[i - 2]);
            if signe {
                return Some((i - 1, true));
            }
        }
        Some((i, false))
    }
}

fn avant_un_signe(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '×' | '÷' | '(')
}
