//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler lecture et affichage sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - tailles bornées
//! - budget temps global
//! - invariant clé : un texte affiché se relit, et l'écart à la valeur exacte
//!   reste sous une demi-unité du dernier chiffre

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::config::Config;
use super::erreur::ParseError;
use super::exposant::pow10;
use super::format::{float_string, format_rat};
use super::lecture::parse_rat;
use super::rationnel::BigRat;

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Générateurs ------------------------ */

/// Grand entier non nul de 1 à ~40 chiffres décimaux.
fn gen_entier(rng: &mut Rng) -> BigInt {
    let morceaux = 1 + rng.pick(4);
    let mut n = BigInt::from(1 + rng.pick(999_999_999));
    for _ in 1..morceaux {
        n = n * BigInt::from(1_000_000_000u32) + BigInt::from(rng.pick(1_000_000_000));
    }
    n
}

fn gen_rat(rng: &mut Rng) -> BigRat {
    let mut num = gen_entier(rng);
    if rng.coin() {
        num = -num;
    }
    let mut den = gen_entier(rng);
    // écarts d'échelle : très grand ou très petit
    match rng.pick(3) {
        0 => num *= pow10(rng.pick(60) as usize),
        1 => den *= pow10(rng.pick(60) as usize),
        _ => {}
    }
    BigRat::new(num, den).unwrap_or_else(|e| panic!("gen_rat: {e}"))
}

/// |a - b| <= 1/2 × 10^k
fn ecart_ok(a: &BigRational, b: &BigRational, k: i64) -> bool {
    let ecart = (a - b).abs() * BigRational::from_integer(BigInt::from(2));
    let unite = if k >= 0 {
        BigRational::from_integer(pow10(k as usize))
    } else {
        BigRational::new(BigInt::from(1), pow10((-k) as usize))
    };
    ecart <= unite
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_aller_retour_fraction_toutes_bases() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    for _ in 0..200 {
        budget(t0, max);

        let r = gen_rat(&mut rng);
        let base = match rng.pick(5) {
            0 => 0,
            1 => 2,
            2 => 8,
            3 => 16,
            _ => 2 + rng.pick(35),
        };
        let c = Config::new()
            .with_input_base(base)
            .and_then(|c| c.with_output_base(base))
            .unwrap_or_else(|e| panic!("config base {base}: {e}"));

        let texte = format_rat(&r, &c).unwrap_or_else(|e| panic!("format: {e}"));
        let relu = parse_rat(&texte, &c).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        assert_eq!(relu, r, "base={base} texte={texte:?}");
    }
}

#[test]
fn fuzz_safe_scientifique_proche_de_l_exact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let c = Config::default();

    for _ in 0..150 {
        budget(t0, max);

        let r = gen_rat(&mut rng);
        let prec = rng.pick(12) as usize;
        let texte = float_string(&r, 'e', prec).unwrap_or_else(|e| panic!("{e}"));

        // forme : [-]d[.ddd]e±NN, premier chiffre non nul
        let corps = texte.strip_prefix('-').unwrap_or(&texte);
        assert_eq!(texte.starts_with('-'), r.is_negative(), "texte={texte}");
        let (mantisse, exp) = corps.split_once('e').unwrap_or_else(|| panic!("texte={texte}"));
        assert!(matches!(mantisse.as_bytes()[0], b'1'..=b'9'), "texte={texte}");
        assert_eq!(mantisse.len(), if prec == 0 { 1 } else { prec + 2 }, "texte={texte}");
        let exp: i64 = exp.parse().unwrap_or_else(|_| panic!("texte={texte}"));

        // la grammaire native relit la notation scientifique exactement
        let relu = parse_rat(&texte, &c).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        assert!(
            ecart_ok(relu.as_ratio(), r.as_ratio(), exp - prec as i64),
            "r={r:?} texte={texte}"
        );
    }
}

#[test]
fn fuzz_safe_virgule_fixe_proche_de_l_exact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);
    let c = Config::default();

    for _ in 0..150 {
        budget(t0, max);

        let r = gen_rat(&mut rng);
        let prec = rng.pick(20) as usize;
        let texte = float_string(&r, 'f', prec).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(texte.contains('.'), prec > 0, "texte={texte}");

        let relu = parse_rat(&texte, &c).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"));
        assert!(
            ecart_ok(relu.as_ratio(), r.as_ratio(), -(prec as i64)),
            "r={r:?} texte={texte}"
        );
    }
}

#[test]
fn fuzz_safe_texte_aleatoire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    const ALPHABET: &[u8] = b"0123456789abcdefxXoObB/.-+eE_ ";
    let mut rng = Rng::new(0xFEED_u64);
    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let longueur = rng.pick(10) as usize;
        let texte: String = (0..longueur)
            .map(|_| char::from(ALPHABET[rng.pick(ALPHABET.len() as u32) as usize]))
            .collect();
        let base = if rng.coin() { 0 } else { 16 };
        let c = Config::new()
            .with_input_base(base)
            .unwrap_or_else(|e| panic!("{e}"));

        match parse_rat(&texte, &c) {
            Ok(r) => {
                // invariants de forme canonique
                assert!(r.denom() > &BigInt::zero(), "texte={texte:?}");
                seen_ok += 1;
            }
            Err(
                ParseError::Empty
                | ParseError::RationalSyntax
                | ParseError::IntegerSyntax(_)
                | ParseError::ZeroDenominator,
            ) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: fuzz trop “méchant”");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}
