// src/noyau/jetons.rs

use std::fmt;
use std::str::FromStr;

use super::erreur::ErreurEval;
use super::normalise::{SYMBOLE_E, SYMBOLE_PI};

/// Garde-fou : nombre maximal de jetons (évaluation bornée, pile courte).
pub const MAX_JETONS: usize = 2048;

/// Table fermée des fonctions (unaires) accessibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Log10,
    Sqrt,
    Abs,
}

impl Fonction {
    pub const TOUTES: [Fonction; 10] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Log,
        Fonction::Log10,
        Fonction::Sqrt,
        Fonction::Abs,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Log => "log",
            Fonction::Log10 => "log10",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
        }
    }
}

impl FromStr for Fonction {
    type Err = ();

    fn from_str(s: &str) -> Result<Fonction, ()> {
        let nom = s.to_ascii_lowercase();
        Fonction::TOUTES
            .into_iter()
            .find(|f| f.nom() == nom)
            .ok_or(())
    }
}

/// Table fermée des constantes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),
    Fonc(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow, // ** (ou ^)

    /// Moins unaire : jamais produit par `tokenize`, seulement par la RPN.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne (normalisée) en jetons.
/// Supporte:
/// - nombres décimaux (12, 1.5, .5)
/// - opérateurs + - * / % ** (et ^)
/// - parenthèses ( )
/// - constantes pi, e (insensibles à la casse), π, ℯ
/// - fonctions de la table fermée ; √ équivaut à sqrt
///
/// Tout autre identifiant est refusé : aucune résolution de nom hors table.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        if out.len() > MAX_JETONS {
            return Err(ErreurEval::ExpressionInvalide);
        }

        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs + parenthèses
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            '^' => Some(Tok::Pow),
            SYMBOLE_PI => Some(Tok::Const(Constante::Pi)),
            SYMBOLE_E => Some(Tok::Const(Constante::E)),
            '√' => Some(Tok::Fonc(Fonction::Sqrt)),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::Pow);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(resoudre_identifiant(&word)?);
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
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
            let txt: String = chars[start..i].iter().collect();
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEval::ExpressionInvalide)?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::ExpressionInvalide);
    }

    Ok(out)
}

fn resoudre_identifiant(word: &str) -> Result<Tok, ErreurEval> {
    if word.eq_ignore_ascii_case("pi") {
        return Ok(Tok::Const(Constante::Pi));
    }
    if word.eq_ignore_ascii_case("e") {
        return Ok(Tok::Const(Constante::E));
    }
    word.parse::<Fonction>()
        .map(Tok::Fonc)
        .map_err(|_| ErreurEval::ExpressionInvalide)
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Const(Constante::Pi) => write!(f, "π"),
            Tok::Const(Constante::E) => write!(f, "e"),
            Tok::Fonc(fun) => write!(f, "{}", fun.nom()),

            Tok::Plus => write!(f, "+"),
            Tok::Minus => write!(f, "-"),
            Tok::Star => write!(f, "*"),
            Tok::Slash => write!(f, "/"),
            Tok::Percent => write!(f, "%"),
            Tok::Pow => write!(f, "**"),
            Tok::Neg => write!(f, "neg"),

            Tok::LPar => write!(f, "("),
            Tok::RPar => write!(f, ")"),
        }
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(Tok::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
