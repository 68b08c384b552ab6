//! Tests de propriétés : invariants du tampon + normalisation + historique.
//!
//! But : marteler la session avec des suites de commandes aléatoires
//! sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueurs bornées
//! - budget temps global
//! - invariant clé : 0 <= curseur <= len après chaque commande

use std::time::{Duration, Instant};

use super::historique::CAPACITE_HISTORIQUE;
use super::jetons::Fonction;
use super::normalise::normalise;
use super::parentheses::{self, solde};
use super::session::{Apercu, Instantane, Session};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

const FRAGMENTS: &[&str] = &[
    "0", "1", "2", "7", "12", ".", "+", "-", "*", "/", "%", "^", "(", ")", "π", "ℯ", "e", "×",
    "÷", "pi", "sin(", " ", "e3", "log10(", "E", "3E2", "e31", "x", ".e3",
];

fn gen_texte(rng: &mut Rng, max: u32) -> String {
    let n = rng.pick(max) + 1;
    let mut s = String::new();
    for _ in 0..n {
        s.push_str(FRAGMENTS[rng.pick(FRAGMENTS.len() as u32) as usize]);
    }
    s
}

fn commande_aleatoire(rng: &mut Rng, s: &mut Session) -> Instantane {
    match rng.pick(14) {
        0..=3 => {
            let f = FRAGMENTS[rng.pick(FRAGMENTS.len() as u32) as usize];
            s.inserer(f)
        }
        4 => s.inserer("("),
        5 => s.inserer(")"),
        6 => s.effacer_avant(),
        7 => s.effacer_apres(),
        8 => s.deplacer(rng.pick(9) as isize - 4),
        9 => {
            if rng.pick(2) == 0 {
                s.debut()
            } else {
                s.fin()
            }
        }
        10 => s.negation(),
        11 => s.inserer_fonction(Fonction::TOUTES[rng.pick(10) as usize]),
        12 => match rng.pick(3) {
            0 => s.carre(),
            1 => s.cube(),
            _ => s.inverse(),
        },
        _ => {
            if rng.pick(8) == 0 {
                s.vider()
            } else {
                s.evaluer().etat
            }
        }
    }
}

fn check_instantane(e: &Instantane) {
    let len = e.texte.chars().count();
    assert!(
        e.curseur <= len,
        "curseur {} hors tampon {:?} (len {len})",
        e.curseur,
        e.texte
    );
    assert_eq!(
        e.parentheses,
        parentheses::etat(&e.texte),
        "état des parenthèses désynchronisé pour {:?}",
        e.texte
    );
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn prop_curseur_toujours_borne() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..200 {
        budget(start, max);
        let mut s = Session::default();
        for _ in 0..60 {
            let e = commande_aleatoire(&mut rng, &mut s);
            check_instantane(&e);
            check_instantane(&s.instantane());
        }
        assert!(s.historique().len() <= CAPACITE_HISTORIQUE);
    }
}

#[test]
fn prop_normalise_idempotent() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);

    for _ in 0..20000 {
        budget(start, max);
        let s = gen_texte(&mut rng, 12);
        let une = normalise(&s);
        assert_eq!(normalise(&une), une, "entrée {s:?}");
        assert_eq!(solde(&s), solde(&une), "parenthèses modifiées pour {s:?}");
    }
}

#[test]
fn prop_fermante_refusee_a_solde_nul() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(7);

    for _ in 0..500 {
        budget(start, max);
        let mut s = Session::default();
        s.inserer(&gen_texte(&mut rng, 8));
        s.deplacer(-(rng.pick(5) as isize));

        let avant = s.instantane();
        if solde(&avant.texte) > 0 {
            continue;
        }
        let apres = s.inserer(")");
        assert_eq!(apres.texte, avant.texte);
        assert_eq!(apres.curseur, avant.curseur);
    }
}

#[test]
fn prop_apercu_egal_validation() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(2024);

    for _ in 0..500 {
        budget(start, max);
        let texte = gen_texte(&mut rng, 10);
        let mut s = Session::default();
        let apercu = s.inserer(&texte).apercu;
        let v = s.evaluer();

        match apercu {
            Apercu::Vide => assert!(v.historique.is_empty()),
            Apercu::Valeur(_) | Apercu::Erreur(_) => assert_eq!(
                v.etat.apercu, apercu,
                "aperçu et validation divergent pour {texte:?}"
            ),
        }
    }
}

#[test]
fn prop_historique_le_plus_recent_en_tete() {
    let mut s = Session::default();
    for i in 1..=6 {
        s.vider();
        s.inserer(&format!("{i}*10"));
        let v = s.evaluer();
        assert_eq!(v.historique[0].resultat, format!("{}", i * 10));
        assert!(v.historique.len() <= CAPACITE_HISTORIQUE);
    }
    let h = s.historique();
    let exprs: Vec<&str> = h.iter().map(|e| e.expression.as_str()).collect();
    assert_eq!(exprs, ["6*10", "5*10", "4*10"]);
}
