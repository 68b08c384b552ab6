// src/noyau/historique.rs
//
// Historique court : les CAPACITE_HISTORIQUE dernières validations,
// la plus récente en tête ; la plus ancienne est évincée au débordement.

use std::collections::VecDeque;
use std::fmt;

pub const CAPACITE_HISTORIQUE: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    /// Expression validée, fermantes synthétiques comprises.
    pub expression: String,
    /// Résultat formaté.
    pub resultat: String,
}

impl fmt::Display for EntreeHistorique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.resultat)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
}

impl Historique {
    pub fn ajouter(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        self.entrees.push_front(EntreeHistorique {
            expression: expression.into(),
            resultat: resultat.into(),
        });
        self.entrees.truncate(CAPACITE_HISTORIQUE);
    }

    /// Copie, la plus récente d’abord.
    pub fn instantane(&self) -> Vec<EntreeHistorique> {
        self.entrees.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_recent_en_tete() {
        let mut h = Historique::default();
        h.ajouter("1+1", "2");
        h.ajouter("2+2", "4");
        let v = h.instantane();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].to_string(), "2+2 = 4");
        assert_eq!(v[1].to_string(), "1+1 = 2");
    }

    #[test]
    fn capacite_bornee() {
        let mut h = Historique::default();
        for i in 0..4 {
            h.ajouter(format!("{i}"), format!("{i}"));
        }
        let v = h.instantane();
        assert_eq!(v.len(), CAPACITE_HISTORIQUE);
        assert_eq!(v[0].expression, "3");
        assert_eq!(v[2].expression, "1");
        assert!(v.iter().all(|e| e.expression != "0"));
    }
}
