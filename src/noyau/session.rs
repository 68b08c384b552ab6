//! Session de calcul : tampon + historique, une commande à la fois.
//!
//! Chaque commande modifie le tampon puis renvoie un `Instantane` rafraîchi :
//! texte, curseur, état des parenthèses (recalculé), aperçu.
//!
//! Aperçu  : normalise(texte) + fermantes synthétiques -> évaluation ; rien n’est modifié.
//! Validation (`evaluer`) : même pipeline, mais le résultat remplace le tampon
//! et l’expression complétée entre dans l’historique.
//!
//! Politique d’échec à la validation :
//! - parenthèses déséquilibrées : tampon conservé
//! - toute autre erreur         : tampon vidé
//! Dans les deux cas l’erreur est rendue dans l’aperçu.

use std::fmt;

use tracing::{debug, info, warn};

use super::erreur::ErreurEval;
use super::eval::{self, Demarche};
use super::format::formater;
use super::historique::{EntreeHistorique, Historique};
use super::jetons::Fonction;
use super::normalise::normalise;
use super::parentheses::{self, EtatParentheses};
use super::tampon::Tampon;

#[derive(Clone, Debug, PartialEq)]
pub enum Apercu {
    /// Tampon vide : rien à montrer.
    Vide,
    Valeur(String),
    Erreur(ErreurEval),
}

impl fmt::Display for Apercu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Apercu::Vide => Ok(()),
            Apercu::Valeur(v) => write!(f, "{v}"),
            Apercu::Erreur(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Instantane {
    pub texte: String,
    pub curseur: usize,
    pub parentheses: EtatParentheses,
    pub apercu: Apercu,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Validation {
    pub etat: Instantane,
    pub historique: Vec<EntreeHistorique>,
}

#[derive(Debug, Default)]
pub struct Session {
    tampon: Tampon,
    historique: Historique,
}

impl Session {
    /* ------------------------ Édition ------------------------ */

    pub fn inserer(&mut self, texte: &str) -> Instantane {
        if !self.tampon.inserer(texte) {
            debug!(fragment = texte, "insertion refusée");
        }
        self.apres("inserer")
    }

    pub fn inserer_fonction(&mut self, f: Fonction) -> Instantane {
        self.tampon.inserer_fonction(f);
        self.apres("inserer_fonction")
    }

    pub fn carre(&mut self) -> Instantane {
        self.tampon.puissance(2);
        self.apres("carre")
    }

    pub fn cube(&mut self) -> Instantane {
        self.tampon.puissance(3);
        self.apres("cube")
    }

    pub fn inverse(&mut self) -> Instantane {
        self.tampon.inverse();
        self.apres("inverse")
    }

    pub fn effacer_avant(&mut self) -> Instantane {
        self.tampon.effacer_avant();
        self.apres("effacer_avant")
    }

    pub fn effacer_apres(&mut self) -> Instantane {
        self.tampon.effacer_apres();
        self.apres("effacer_apres")
    }

    pub fn deplacer(&mut self, delta: isize) -> Instantane {
        self.tampon.deplacer(delta);
        self.apres("deplacer")
    }

    pub fn debut(&mut self) -> Instantane {
        self.tampon.debut();
        self.apres("debut")
    }

    pub fn fin(&mut self) -> Instantane {
        self.tampon.fin();
        self.apres("fin")
    }

    pub fn negation(&mut self) -> Instantane {
        self.tampon.negation();
        self.apres("negation")
    }

    pub fn vider(&mut self) -> Instantane {
        self.tampon.vider();
        self.apres("vider")
    }

    /* ------------------------ Validation ------------------------ */

    pub fn evaluer(&mut self) -> Validation {
        let texte = self.tampon.texte();

        if texte.trim().is_empty() {
            return Validation {
                etat: self.instantane(),
                historique: self.historique(),
            };
        }

        let manque = parentheses::etat(&texte).fermantes_manquantes();
        let expression = format!("{texte}{}", ")".repeat(manque));

        let apercu = match calculer(&texte, manque) {
            Ok(resultat) => {
                info!(%expression, %resultat, "validation");
                self.historique.ajouter(expression, resultat.clone());
                self.tampon.remplacer(&resultat);
                Apercu::Valeur(resultat)
            }
            Err(e) if e.est_parentheses() => {
                warn!(%expression, erreur = %e, "validation refusée, tampon conservé");
                Apercu::Erreur(e)
            }
            Err(e) => {
                warn!(%expression, erreur = %e, "validation refusée, tampon vidé");
                self.tampon.vider();
                Apercu::Erreur(e)
            }
        };

        Validation {
            etat: Instantane {
                texte: self.tampon.texte(),
                curseur: self.tampon.curseur(),
                parentheses: self.tampon.parentheses(),
                apercu,
            },
            historique: self.historique(),
        }
    }

    /* ------------------------ Lecture ------------------------ */

    /// État courant + aperçu (sans rien modifier).
    pub fn instantane(&self) -> Instantane {
        let texte = self.tampon.texte();
        let parentheses = parentheses::etat(&texte);

        let apercu = if texte.trim().is_empty() {
            Apercu::Vide
        } else {
            match calculer(&texte, parentheses.fermantes_manquantes()) {
                Ok(v) => Apercu::Valeur(v),
                Err(e) => Apercu::Erreur(e),
            }
        };

        Instantane {
            texte,
            curseur: self.tampon.curseur(),
            parentheses,
            apercu,
        }
    }

    pub fn historique(&self) -> Vec<EntreeHistorique> {
        self.historique.instantane()
    }

    pub fn demarche(&self) -> Demarche {
        eval::demarche(&self.tampon.texte())
    }

    fn apres(&self, commande: &str) -> Instantane {
        debug!(
            commande,
            texte = %self.tampon.texte(),
            curseur = self.tampon.curseur(),
            "édition"
        );
        self.instantane()
    }
}

/// Pipeline commun aperçu / validation.
fn calculer(texte: &str, fermantes: usize) -> Result<String, ErreurEval> {
    let complet = normalise(texte) + &")".repeat(fermantes);
    eval::evaluer(&complet).map(formater)
}
