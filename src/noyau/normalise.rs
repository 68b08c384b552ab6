// src/noyau/normalise.rs
//
// Normalisation : écriture utilisateur -> syntaxe arithmétique canonique.
//
// Étapes (dans cet ordre) :
//   1) notation scientifique  2e3      -> 2*10**3 (sauf exposant suivi d’un point)
//   2) multiplication implicite 2(…), (…)(…), 2π, (…)π, (…)5, π(…), πℯ, π2
//   3) constantes              π -> pi, ℯ -> e
//   4) puissance               ^ -> **
//   5) glyphes                 × -> *, ÷ -> /
//
// Invariants :
// - idempotent : normalise(normalise(x)) == normalise(x)
// - n’ajoute ni ne retire aucune parenthèse
//
// Les étapes 1-3 travaillent sur un découpage grossier (nombres, mots,
// symboles) pour ne jamais couper un identifiant : "log10(" reste intact.

#[derive(Clone, Debug, PartialEq)]
enum Morceau {
    /// chiffres avec au plus un point : 12, 1.5, .5, 3.
    Nombre(String),
    /// [A-Za-z_][A-Za-z0-9_]*
    Mot(String),
    /// π ou ℯ
    Symbole(char),
    Ouvrante,
    Fermante,
    Autre(char),
}

impl Morceau {
    fn est_constante(&self) -> bool {
        match self {
            Morceau::Symbole(_) => true,
            Morceau::Mot(w) => w.eq_ignore_ascii_case("pi") || w.eq_ignore_ascii_case("e"),
            _ => false,
        }
    }

    fn pousser_dans(&self, out: &mut String) {
        match self {
            Morceau::Nombre(s) | Morceau::Mot(s) => out.push_str(s),
            Morceau::Symbole(c) | Morceau::Autre(c) => out.push(*c),
            Morceau::Ouvrante => out.push('('),
            Morceau::Fermante => out.push(')'),
        }
    }
}

pub const SYMBOLE_PI: char = 'π';
pub const SYMBOLE_E: char = 'ℯ';

/// Texte normalisé, prêt pour l’évaluateur.
pub fn normalise(texte: &str) -> String {
    let s = notation_scientifique(texte);
    let s = multiplication_implicite(&s);
    let s = constantes(&s);
    let s = s.replace('^', "**");
    s.replace('×', "*").replace('÷', "/")
}

/// Le texte se termine-t-il par une valeur (nombre, `)` ou constante) ?
/// Sert à la multiplication implicite au moment de l’édition.
pub fn finit_par_valeur(texte: &str) -> bool {
    match decouper(texte).last() {
        Some(Morceau::Nombre(_) | Morceau::Fermante) => true,
        Some(m) => m.est_constante(),
        None => false,
    }
}

fn decouper(texte: &str) -> Vec<Morceau> {
    let chars: Vec<char> = texte.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit());
        if debut_nombre {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            out.push(Morceau::Nombre(chars[start..i].iter().collect()));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Morceau::Mot(chars[start..i].iter().collect()));
            continue;
        }

        out.push(match c {
            SYMBOLE_PI | SYMBOLE_E => Morceau::Symbole(c),
            '(' => Morceau::Ouvrante,
            ')' => Morceau::Fermante,
            _ => Morceau::Autre(c),
        });
        i += 1;
    }

    out
}

fn joindre(morceaux: &[Morceau]) -> String {
    let mut out = String::new();
    for m in morceaux {
        m.pousser_dans(&mut out);
    }
    out
}

/// "e<chiffres>" collé derrière un nombre : exposant décimal.
fn exposant_decimal(m: &Morceau) -> Option<&str> {
    let Morceau::Mot(w) = m else {
        return None;
    };
    let reste = w.strip_prefix('e').or_else(|| w.strip_prefix('E'))?;
    if !reste.is_empty() && reste.chars().all(|c| c.is_ascii_digit()) {
        Some(reste)
    } else {
        None
    }
}

fn notation_scientifique(texte: &str) -> String {
    let morceaux = decouper(texte);
    let mut out = String::with_capacity(texte.len());
    let mut i = 0;

    while i < morceaux.len() {
        if let Morceau::Nombre(n) = &morceaux[i] {
            let exposant = morceaux.get(i + 1).and_then(exposant_decimal);
            if let Some(exp) = exposant.filter(|_| !suivi_d_un_point(morceaux.get(i + 2))) {
                out.push_str(n);
                out.push_str("*10**");
                out.push_str(exp);
                i += 2;
                continue;
            }
        }
        morceaux[i].pousser_dans(&mut out);
        i += 1;
    }

    out
}

/// "2e3.e3" : pas de réécriture, sinon "3." formerait un nouveau nombre devant "e3".
fn suivi_d_un_point(m: Option<&Morceau>) -> bool {
    match m {
        Some(Morceau::Autre('.')) => true,
        Some(Morceau::Nombre(n)) => n.starts_with('.'),
        _ => false,
    }
}

/// Faut-il un `*` entre deux morceaux adjacents ?
/// Un glyphe π/ℯ ne se soude jamais à un voisin (nombre, mot, autre constante).
fn produit_implicite(a: &Morceau, b: &Morceau) -> bool {
    use Morceau::*;

    match (a, b) {
        (Nombre(_) | Fermante, Ouvrante) => true,
        (Nombre(_) | Fermante, m) if m.est_constante() => true,
        (Fermante, Nombre(_)) => true,
        (m, Ouvrante) if m.est_constante() => true,
        (a, b) if a.est_constante() && (b.est_constante() || matches!(b, Nombre(_))) => true,
        (Symbole(_), Mot(_)) | (Mot(_), Symbole(_)) => true,
        _ => false,
    }
}

fn multiplication_implicite(texte: &str) -> String {
    let morceaux = decouper(texte);
    let mut out = String::with_capacity(texte.len() + 8);

    for (i, m) in morceaux.iter().enumerate() {
        if i > 0 && produit_implicite(&morceaux[i - 1], m) {
            out.push('*');
        }
        m.pousser_dans(&mut out);
    }

    out
}

fn constantes(texte: &str) -> String {
    let morceaux: Vec<Morceau> = decouper(texte)
        .into_iter()
        .map(|m| match m {
            Morceau::Symbole(SYMBOLE_PI) => Morceau::Mot("pi".into()),
            Morceau::Symbole(_) => Morceau::Mot("e".into()),
            autre => autre,
        })
        .collect();
    joindre(&morceaux)
}

#[cfg(test)]
mod tests {
    use super::normalise;
    use crate::noyau::parentheses::solde;

    #[test]
    fn multiplication_devant_parenthese() {
        assert_eq!(normalise("2(3+4)"), "2*(3+4)");
        assert_eq!(normalise("(1)(2)"), "(1)*(2)");
        assert_eq!(normalise("(3+2)5"), "(3+2)*5");
    }

    #[test]
    fn constantes_et_multiplication() {
        assert_eq!(normalise("2π"), "2*pi");
        assert_eq!(normalise("(1+1)ℯ"), "(1+1)*e");
        assert_eq!(normalise("3e"), "3*e");
        assert_eq!(normalise("π(2)"), "pi*(2)");
    }

    #[test]
    fn glyphes_jamais_soudes() {
        assert_eq!(normalise("πℯ"), "pi*e");
        assert_eq!(normalise("ℯ2"), "e*2");
        assert_eq!(normalise("2ℯ3"), "2*e*3");
        assert_eq!(normalise("πx"), "pi*x");
        assert_eq!(normalise("eπ"), "e*pi");
        // mots ASCII : rien à découper
        assert_eq!(normalise("pie"), "pie");
    }

    #[test]
    fn notation_scientifique() {
        assert_eq!(normalise("2e3"), "2*10**3");
        assert_eq!(normalise("1.5e2+1"), "1.5*10**2+1");
        // pas un exposant : identifiant quelconque, laissé tel quel
        assert_eq!(normalise("2e3x"), "2e3x");
        // exposant suivi d’un point : laissé tel quel
        assert_eq!(normalise("2e3.e3"), "2e3.e3");
        assert_eq!(normalise("3E2.e3"), "3E2.e3");
        assert_eq!(normalise("2e3.5"), "2e3.5");
    }

    #[test]
    fn puissance_et_glyphes() {
        assert_eq!(normalise("2^3"), "2**3");
        assert_eq!(normalise("6÷2×3"), "6/2*3");
    }

    #[test]
    fn identifiants_intacts() {
        assert_eq!(normalise("log10(100)"), "log10(100)");
        assert_eq!(normalise("sqrt(4)+abs(-1)"), "sqrt(4)+abs(-1)");
    }

    #[test]
    fn fin_de_valeur() {
        use super::finit_par_valeur;

        assert!(finit_par_valeur("12"));
        assert!(finit_par_valeur("(1+2)"));
        assert!(finit_par_valeur("3π"));
        assert!(finit_par_valeur("2e"));
        assert!(!finit_par_valeur("log10"));
        assert!(!finit_par_valeur("2+"));
        assert!(!finit_par_valeur(""));
    }

    #[test]
    fn idempotence() {
        for s in [
            "2(3+4)",
            "2e3e4",
            "πℯ",
            "2π3",
            "(1)π2",
            "ℯ2e3",
            "2^3^2",
            "sin(π/2)×4÷(1)(2)",
            "1.2.3(4)",
            "  2 (3) ",
            "2e3.e3",
            "1e2.e3",
            "3E2.e3",
            "2e9.e31",
            "1.e2.e3e4",
            "πℯ2",
            "2.e3",
        ] {
            let une = normalise(s);
            assert_eq!(normalise(&une), une, "entrée {s:?}");
        }
    }

    #[test]
    fn parentheses_preservees() {
        for s in ["2(3+4", "(1)(2)((", ")5(π", "sin(2e3"] {
            assert_eq!(solde(s), solde(&normalise(s)), "entrée {s:?}");
            assert_eq!(
                s.matches('(').count(),
                normalise(s).matches('(').count()
            );
        }
    }
}
