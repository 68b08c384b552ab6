//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : tenir la session du noyau et le dernier instantané rendu,
//! et traduire une `Commande` (bouton ou clavier) en appel du noyau.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `Session`.
//! - Une commande à la fois ; l’instantané affiché est toujours le dernier rendu.

use crate::noyau::eval::Demarche;
use crate::noyau::historique::EntreeHistorique;
use crate::noyau::jetons::Fonction;
use crate::noyau::{Instantane, Session};

/// Commandes de la calculatrice (boutons + clavier).
#[derive(Clone, Debug, PartialEq)]
pub enum Commande {
    Inserer(String),
    Fonction(Fonction),
    Carre,
    Cube,
    Inverse,
    EffacerAvant,
    EffacerApres,
    Deplacer(isize),
    Debut,
    Fin,
    Negation,
    Vider,
    Evaluer,
}

#[derive(Debug)]
pub struct AppCalc {
    session: Session,

    // --- sorties (dernier rendu du noyau) ---
    pub etat: Instantane,
    pub historique: Vec<EntreeHistorique>,
    pub demarche: Demarche,
}

impl Default for AppCalc {
    fn default() -> Self {
        let session = Session::default();
        Self {
            etat: session.instantane(),
            historique: session.historique(),
            demarche: session.demarche(),
            session,
        }
    }
}

impl AppCalc {
    pub fn appliquer(&mut self, commande: Commande) {
        let s = &mut self.session;

        self.etat = match commande {
            Commande::Inserer(texte) => s.inserer(&texte),
            Commande::Fonction(f) => s.inserer_fonction(f),
            Commande::Carre => s.carre(),
            Commande::Cube => s.cube(),
            Commande::Inverse => s.inverse(),
            Commande::EffacerAvant => s.effacer_avant(),
            Commande::EffacerApres => s.effacer_apres(),
            Commande::Deplacer(delta) => s.deplacer(delta),
            Commande::Debut => s.debut(),
            Commande::Fin => s.fin(),
            Commande::Negation => s.negation(),
            Commande::Vider => s.vider(),
            Commande::Evaluer => {
                let v = s.evaluer();
                self.historique = v.historique;
                v.etat
            }
        };

        self.demarche = self.session.demarche();
    }

    /// Texte du tampon avec le curseur rendu visible.
    pub fn texte_avec_curseur(&self) -> String {
        let mut out = String::with_capacity(self.etat.texte.len() + 3);
        for (i, c) in self.etat.texte.chars().enumerate() {
            if i == self.etat.curseur {
                out.push('│');
            }
            out.push(c);
        }
        if self.etat.curseur >= self.etat.texte.chars().count() {
            out.push('│');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::Apercu;

    #[test]
    fn commandes_vers_le_noyau() {
        let mut app = AppCalc::default();
        for c in ["2", "(", "3"] {
            app.appliquer(Commande::Inserer(c.into()));
        }
        assert_eq!(app.etat.texte, "2*(3");
        assert_eq!(app.etat.apercu, Apercu::Valeur("6".into()));
        assert_eq!(app.demarche.normalisee, "2*(3)");

        app.appliquer(Commande::Deplacer(-1));
        assert_eq!(app.texte_avec_curseur(), "2*(│3");

        app.appliquer(Commande::Evaluer);
        assert_eq!(app.etat.texte, "6");
        assert_eq!(app.texte_avec_curseur(), "6│");
        assert_eq!(app.historique.len(), 1);
        assert_eq!(app.historique[0].expression, "2*(3)");
    }
}
