// src/noyau/expr.rs
//
// AST flottant + interprète récursif.
// - Nombre : littéral décimal
// - Const  : pi / e (table fermée)
// - Appel  : fonction de la table fermée, un argument
//
// IMPORTANT (SAFE):
// - aucune résolution de nom : tout ce qui est atteignable est énuméré ici.
// - aucune valeur non finie ne sort de evaluer() : chaque cas limite
//   devient une ErreurEval typée.

use std::fmt;

use super::erreur::ErreurEval;
use super::jetons::{Constante, Fonction};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Const(Constante),

    Neg(Box<Expr>),
    Appel(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn evaluer(&self) -> Result<f64, ErreurEval> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,
            Const(c) => c.valeur(),

            Neg(x) => -x.evaluer()?,
            Appel(f, x) => appliquer(*f, x.evaluer()?)?,

            Add(a, b) => a.evaluer()? + b.evaluer()?,
            Sub(a, b) => a.evaluer()? - b.evaluer()?,
            Mul(a, b) => a.evaluer()? * b.evaluer()?,
            Div(a, b) => {
                let (a, b) = (a.evaluer()?, b.evaluer()?);
                if b == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                a / b
            }
            Mod(a, b) => modulo(a.evaluer()?, b.evaluer()?)?,
            Pow(a, b) => puissance(a.evaluer()?, b.evaluer()?)?,
        };

        fini(v)
    }
}

fn fini(v: f64) -> Result<f64, ErreurEval> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::HorsLimites)
    }
}

/// Modulo « plancher » : le reste prend le signe du diviseur (-7 % 3 = 2).
fn modulo(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if b == 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn puissance(base: f64, exp: f64) -> Result<f64, ErreurEval> {
    if base == 0.0 && exp < 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }
    if base < 0.0 && exp.fract() != 0.0 {
        return Err(ErreurEval::ResultatComplexe);
    }
    Ok(base.powf(exp))
}

fn appliquer(f: Fonction, x: f64) -> Result<f64, ErreurEval> {
    let v = match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),
        Fonction::Asin | Fonction::Acos if !(-1.0..=1.0).contains(&x) => {
            return Err(ErreurEval::HorsDomaine)
        }
        Fonction::Asin => x.asin(),
        Fonction::Acos => x.acos(),
        Fonction::Atan => x.atan(),
        Fonction::Log | Fonction::Log10 if x <= 0.0 => return Err(ErreurEval::HorsDomaine),
        Fonction::Log => x.ln(),
        Fonction::Log10 => x.log10(),
        Fonction::Sqrt if x < 0.0 => return Err(ErreurEval::ResultatComplexe),
        Fonction::Sqrt => x.sqrt(),
        Fonction::Abs => x.abs(),
    };
    Ok(v)
}

/// Affichage entièrement parenthésé (démarche) : la structure de l’arbre est explicite.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Nombre(v) => write!(f, "{v}"),
            Const(Constante::Pi) => write!(f, "π"),
            Const(Constante::E) => write!(f, "e"),
            Neg(x) => write!(f, "-({x})"),
            Appel(fun, x) => write!(f, "{}({x})", fun.nom()),
            Add(a, b) => write!(f, "({a} + {b})"),
            Sub(a, b) => write!(f, "({a} - {b})"),
            Mul(a, b) => write!(f, "({a} * {b})"),
            Div(a, b) => write!(f, "({a} / {b})"),
            Mod(a, b) => write!(f, "({a} % {b})"),
            Pow(a, b) => write!(f, "({a} ** {b})"),
        }
    }
}
