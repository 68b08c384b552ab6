// src/noyau/format.rs
//
// Affichage d’un résultat (aperçu ET validation, même règle) :
// - à moins de TOLERANCE_ENTIER d’un entier => cet entier
// - sinon au plus DECIMALES_MAX décimales, zéros finaux et point final retirés

pub const TOLERANCE_ENTIER: f64 = 1e-10;
pub const DECIMALES_MAX: usize = 8;

pub fn formater(v: f64) -> String {
    let entier = v.round();

    let txt = if (v - entier).abs() < TOLERANCE_ENTIER {
        format!("{entier:.0}")
    } else {
        let brut = format!("{v:.prec$}", prec = DECIMALES_MAX);
        brut.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    // -0 (ex: -0.000000001) : pas de zéro signé à l’écran
    if txt == "-0" {
        "0".to_string()
    } else {
        txt
    }
}

#[cfg(test)]
mod tests {
    use super::formater;

    #[test]
    fn entiers() {
        assert_eq!(formater(4.0), "4");
        assert_eq!(formater(-12.0), "-12");
        assert_eq!(formater(2.00000000001), "2");
        assert_eq!(formater(1e20), "100000000000000000000");
    }

    #[test]
    fn decimales() {
        assert_eq!(formater(0.5), "0.5");
        assert_eq!(formater(1.0 / 3.0), "0.33333333");
        assert_eq!(formater(2.0f64.sqrt()), "1.41421356");
        assert_eq!(formater(-0.125), "-0.125");
    }

    #[test]
    fn jamais_moins_zero() {
        assert_eq!(formater(-1e-11), "0");
        assert_eq!(formater(-0.000000001), "0");
    }
}
