// src/noyau/rationnel.rs
//
// Valeur rationnelle exacte (sans flottants).
// Invariants (garantis par les constructeurs) :
// - dénominateur > 0
// - pgcd(num, den) = 1
// Immuable : aucune méthode publique en &mut self ; le formatage travaille sur des copies.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::entier::Entier;
use super::erreur::{NarrowingError, ParseError, ParseResult};
use super::valeur::{Context, Matrix, Value, ValueKind, Vector};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigRat {
    r: BigRational,
}

impl BigRat {
    /// num/den réduit, dénominateur positif. Refuse den = 0.
    pub fn new(num: BigInt, den: BigInt) -> ParseResult<Self> {
        if den.is_zero() {
            return Err(ParseError::ZeroDenominator);
        }
        // BigRational::new réduit et remonte le signe au numérateur
        Ok(BigRat {
            r: BigRational::new(num, den),
        })
    }

    pub fn from_integer(n: BigInt) -> Self {
        BigRat {
            r: BigRational::from_integer(n),
        }
    }

    pub fn numer(&self) -> &BigInt {
        self.r.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.r.denom()
    }

    pub fn is_integer(&self) -> bool {
        self.r.denom().is_one()
    }

    pub fn is_zero(&self) -> bool {
        self.r.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.r.is_negative()
    }

    /// Vue sur le rationnel sous-jacent (lecture seule).
    pub fn as_ratio(&self) -> &BigRational {
        &self.r
    }

    /// Un rationnel est déjà en forme normale.
    pub fn eval(&self, _ctx: &Context<'_>) -> Value {
        Value::BigRat(self.clone())
    }

    /// Redescend en entier (puis Int si possible) quand den = 1.
    pub fn shrink(&self) -> Value {
        if !self.is_integer() {
            return Value::BigRat(self.clone());
        }
        Entier::new(self.numer().clone()).shrink()
    }

    /// Conversion vérifiée : refuse Int / BigInt (un rationnel n'est pas forcément entier).
    pub fn try_to_type(&self, which: ValueKind) -> Result<Value, NarrowingError> {
        match which {
            ValueKind::Int | ValueKind::BigInt => Err(NarrowingError::InvalidNarrowing {
                from: ValueKind::BigRat,
                to: which,
            }),
            ValueKind::BigRat => Ok(Value::BigRat(self.clone())),
            ValueKind::Vector => Ok(Value::Vector(Vector::new(vec![Value::BigRat(
                self.clone(),
            )]))),
            ValueKind::Matrix => Ok(Value::Matrix(Matrix::scalar(Value::BigRat(self.clone())))),
        }
    }

    /// Conversion de type. Demander Int / BigInt est une erreur de programmation : panic.
    pub fn to_type(&self, which: ValueKind) -> Value {
        match self.try_to_type(which) {
            Ok(v) => v,
            Err(_) if which == ValueKind::Int => panic!("big rat to int"),
            Err(_) => panic!("big rat to big int"),
        }
    }
}

impl fmt::Debug for BigRat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigRat({}/{})", self.numer(), self.denom())
    }
}
