//! Tests scientifiques (campagne) : propriétés attendues du noyau rationnel, bout en bout.
//!
//! Texte -> parse_rat -> BigRat -> format_rat / float_string -> texte, avec des configs explicites.
//! Budgets temps courts : les grands exposants doivent rester rapides grâce aux paquets de 10^9.

use std::time::{Duration, Instant};

use num_bigint::BigInt;

use super::config::Config;
use super::erreur::{FormatError, ParseError};
use super::exposant::{pow10, rat_exponent};
use super::format::{float_string, format_rat};
use super::lecture::parse_rat;
use super::rationnel::BigRat;
use super::valeur::{Value, ValueKind};

fn cfg_base(base: u32) -> Config {
    Config::new()
        .with_input_base(base)
        .unwrap_or_else(|e| panic!("base {base}: {e}"))
}

fn lit(s: &str, config: &Config) -> BigRat {
    parse_rat(s, config).unwrap_or_else(|e| panic!("texte={s:?} err={e}"))
}

fn rat(n: i64, d: i64) -> BigRat {
    BigRat::new(BigInt::from(n), BigInt::from(d)).unwrap()
}

fn affiche(r: &BigRat, format: &str) -> String {
    format_rat(r, &Config::new().with_format(format))
        .unwrap_or_else(|e| panic!("r={r:?} format={format:?} err={e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Aller-retour ------------------------ */

#[test]
fn sci_aller_retour_entiers() {
    let c = Config::default();
    for n in [0i64, 1, -1, 42, -1_000_000_007, i64::MAX, i64::MIN] {
        let r = BigRat::from_integer(BigInt::from(n));
        let texte = format_rat(&r, &c).unwrap();
        assert_eq!(texte, format!("{n}/1"));
        assert_eq!(lit(&texte, &c), r, "texte={texte:?}");
    }
}

#[test]
fn sci_aller_retour_en_base() {
    // base de sortie = base d'entrée : la fraction se relit telle quelle
    for base in [2u32, 8, 16, 36] {
        let c = cfg_base(base).with_output_base(base).unwrap();
        let r = rat(-355, 113);
        let texte = format_rat(&r, &c).unwrap();
        assert_eq!(lit(&texte, &c), r, "base={base} texte={texte:?}");
    }
}

/* ------------------------ Exposant ------------------------ */

#[test]
fn sci_exposant_bornes() {
    for k in [0usize, 1, 9, 10, 18] {
        let x = BigRat::from_integer(pow10(k));
        assert_eq!(rat_exponent(x.as_ratio()), k as i64);
    }
    assert_eq!(rat_exponent(rat(999_999_999, 1).as_ratio()), 8);
    assert_eq!(rat_exponent(rat(1_000_000_000, 1).as_ratio()), 9);
    assert_eq!(rat_exponent(rat(1, 1000).as_ratio()), -3);
}

/* ------------------------ Virgule fixe / scientifique ------------------------ */

#[test]
fn sci_virgule_fixe() {
    assert_eq!(float_string(&rat(1, 3), 'f', 5).unwrap(), "0.33333");
    assert_eq!(float_string(&rat(2, 1), 'f', 0).unwrap(), "2");
    assert_eq!(affiche(&rat(22, 7), "%.10f"), "3.1428571429");
}

#[test]
fn sci_notation_scientifique() {
    let s = float_string(&rat(123_456_789, 1), 'e', 3).unwrap();
    assert!(s.starts_with("1.235"), "s={s}");
    assert!(s.ends_with("e+08"), "s={s}");

    let s = float_string(&rat(1, 8), 'e', 2).unwrap();
    assert!(s.ends_with("e-01"), "s={s}");

    assert_eq!(affiche(&rat(-22, 7), "%.4E"), "-3.1429E+00");
    // précision par défaut (6) quand le gabarit n'en donne pas
    assert_eq!(affiche(&rat(1, 7), "%e"), "1.428571e-01");
}

#[test]
fn sci_scientifique_enorme_sans_flottant() {
    // bien au-delà de f64 : 7 × 10^2000 et son inverse
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let grand = BigRat::from_integer(pow10(2000) * BigInt::from(7));
    assert_eq!(float_string(&grand, 'e', 2).unwrap(), "7.00e+2000");
    budget(t0, max);

    let petit = BigRat::new(BigInt::from(1), pow10(2000) * BigInt::from(7)).unwrap();
    // 1/7 = 0.142857… -> 1.43e-2001
    assert_eq!(float_string(&petit, 'e', 2).unwrap(), "1.43e-2001");
    budget(t0, max);
}

/* ------------------------ Lecture ------------------------ */

#[test]
fn sci_lecture_base_16() {
    assert_eq!(lit("ff/10", &cfg_base(16)), rat(255, 16));
    assert_eq!(lit("1/3", &Config::default()), rat(1, 3));
}

#[test]
fn sci_erreurs_de_lecture() {
    assert_eq!(
        parse_rat("1/x", &Config::default()),
        Err(ParseError::RationalSyntax)
    );
    assert_eq!(
        parse_rat("1/x", &cfg_base(16)),
        Err(ParseError::IntegerSyntax("x".to_string()))
    );
}

/* ------------------------ Shrink / conversions ------------------------ */

#[test]
fn sci_shrink() {
    assert_eq!(rat(6, 3).shrink(), Value::Int(2));
    assert_eq!(rat(1, 3).shrink(), Value::BigRat(rat(1, 3)));
}

#[test]
fn sci_conversion_invalide_signalee() {
    let r = rat(1, 3);
    assert!(r.try_to_type(ValueKind::Int).is_err());
    let res = std::panic::catch_unwind(|| r.to_type(ValueKind::Int));
    assert!(res.is_err(), "to_type(Int) doit paniquer");
}

#[test]
fn sci_verbe_invalide_n_abime_pas_la_valeur() {
    let r = rat(5, 4);
    let avant = r.clone();
    assert_eq!(
        format_rat(&r, &Config::new().with_format("%g")),
        Err(FormatError::UnsupportedVerb('g'))
    );
    assert_eq!(r, avant);
    assert_eq!(affiche(&r, "%.2f"), "1.25");
}
