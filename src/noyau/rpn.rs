// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en refusant toute suite
//   qui n’est pas une expression infixe complète
// - Puis reconstruire Expr
//
// Précédences (de la plus faible à la plus forte) :
//   + -   <   * / %   <   moins unaire   <   **
// - ** est associatif à droite : 2**3**2 = 2**(3**2)
// - -2**2 = -(2**2) ; 2**-1 est accepté (le signe colle à l’exposant)
// - une fonction reste collée à son argument parenthésé
//
// NOTE:
// - `attend_valeur` distingue moins unaire et moins binaire, et détecte
//   les juxtapositions ("2 3", "2 (3)") ou les opérateurs orphelins.

use super::erreur::ErreurEval;
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent => 2,
        Tok::Neg => 3,
        Tok::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonc(Sin), LPar, Const(Pi), Slash, Num(2), RPar]
///   rpn:    [Const(Pi), Num(2), Slash, Fonc(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // true tant qu’une valeur (atome, fonction, parenthèse) est attendue.
    let mut attend_valeur = true;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Const(_) => {
                if !attend_valeur {
                    return Err(ErreurEval::ExpressionInvalide);
                }
                out.push(tok.clone());
                attend_valeur = false;
            }

            Tok::Fonc(_) => {
                // une fonction : en position de valeur, suivie de '('
                if !attend_valeur || !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(ErreurEval::ExpressionInvalide);
                }
                ops.push(tok.clone());
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurEval::ExpressionInvalide);
                }
                ops.push(Tok::LPar);
            }

            Tok::RPar => {
                // "()" ou "(2+)" : rien de complet à fermer
                if attend_valeur {
                    return Err(ErreurEval::ExpressionInvalide);
                }

                let mut ferme = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ferme = true;
                        break;
                    }
                    out.push(top);
                }
                if !ferme {
                    return Err(ErreurEval::ExpressionInvalide);
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Fonc(_)) = ops.last() {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Minus | Tok::Plus if attend_valeur => {
                // signe : moins unaire (préfixe, ne dépile rien) ; plus unaire ignoré
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Pow => {
                if attend_valeur {
                    return Err(ErreurEval::ExpressionInvalide);
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonc(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok.clone());
                attend_valeur = true;
            }

            Tok::Neg => return Err(ErreurEval::ExpressionInvalide),
        }
    }

    // vide, ou opérateur final sans opérande
    if attend_valeur {
        return Err(ErreurEval::ExpressionInvalide);
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::Fonc(_)) {
            return Err(ErreurEval::ExpressionInvalide);
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn {
        let e = match tok {
            Tok::Num(v) => Expr::Nombre(*v),
            Tok::Const(c) => Expr::Const(*c),

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                Expr::Neg(Box::new(x))
            }

            Tok::Fonc(f) => {
                let x = st.pop().ok_or(ErreurEval::ExpressionInvalide)?;
                Expr::Appel(*f, Box::new(x))
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Pow => {
                let b = Box::new(st.pop().ok_or(ErreurEval::ExpressionInvalide)?);
                let a = Box::new(st.pop().ok_or(ErreurEval::ExpressionInvalide)?);

                match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    Tok::Percent => Expr::Mod(a, b),
                    _ => Expr::Pow(a, b),
                }
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEval::ExpressionInvalide),
        };
        st.push(e);
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(ErreurEval::ExpressionInvalide),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn(s: &str) -> String {
        let t = tokenize(s).unwrap();
        format_tokens(&to_rpn(&t).unwrap())
    }

    fn invalide(s: &str) {
        let t = tokenize(s).unwrap();
        assert_eq!(
            to_rpn(&t).and_then(|r| from_rpn(&r)),
            Err(ErreurEval::ExpressionInvalide),
            "expr={s:?}"
        );
    }

    #[test]
    fn precedences() {
        assert_eq!(rpn("1+2*3"), "1 2 3 * +");
        assert_eq!(rpn("(1+2)*3"), "1 2 + 3 *");
        assert_eq!(rpn("8/4/2"), "8 4 / 2 /");
        assert_eq!(rpn("7%4*2"), "7 4 % 2 *");
    }

    #[test]
    fn puissance_associative_a_droite() {
        assert_eq!(rpn("2**3**2"), "2 3 2 ** **");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(rpn("-2**2"), "2 2 ** neg");
        assert_eq!(rpn("-2*3"), "2 neg 3 *");
        assert_eq!(rpn("2**-1"), "2 1 neg **");
        assert_eq!(rpn("3--5"), "3 5 neg -");
        assert_eq!(rpn("+4"), "4");
    }

    #[test]
    fn fonctions_collees() {
        assert_eq!(rpn("sin(pi/2)*2"), "π 2 / sin 2 *");
        assert_eq!(rpn("sqrt(4)**2"), "4 sqrt 2 **");
    }

    #[test]
    fn suites_incompletes() {
        invalide("");
        invalide("2 3");
        invalide("2 (3)");
        invalide("2+");
        invalide("*2");
        invalide("sin 2");
        invalide("2 sin(1)");
        invalide("(2+)");
        invalide("(");
    }
}
