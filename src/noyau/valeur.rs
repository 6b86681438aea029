// src/noyau/valeur.rs
//
// Union fermée des valeurs de l'évaluateur : Int, BigInt, BigRat, Vector, Matrix.
// eval / to_type / shrink / affichage : match exhaustif, pas de dispatch dynamique.

use num_bigint::BigInt;

use super::config::Config;
use super::entier::{format_bigint, Entier};
use super::erreur::{FormatResult, NarrowingError};
use super::format::{float_string, format_rat};
use super::gabarit;
use super::rationnel::BigRat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    BigInt,
    BigRat,
    Vector,
    Matrix,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    BigInt(Entier),
    BigRat(BigRat),
    Vector(Vector),
    Matrix(Matrix),
}

/// Contexte d'évaluation : la config (lecture seule) pour la durée d'une requête.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    config: &'a Config,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a Config) -> Self {
        Context { config }
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }
}

/* ------------------------ Vecteur / matrice ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector(Vec<Value>);

impl Vector {
    pub fn new(elems: Vec<Value>) -> Self {
        Vector(elems)
    }

    pub fn elems(&self) -> &[Value] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    shape: Vec<Value>,
    data: Vec<Value>,
}

/// Dimension valide : Int positif ou nul.
fn dimension(v: &Value) -> Option<usize> {
    match v {
        Value::Int(n) => usize::try_from(*n).ok(),
        _ => None,
    }
}

impl Matrix {
    /// `shape` : dimensions (Int), `data` : éléments à plat, ligne par ligne.
    /// Le produit des dimensions doit valoir data.len() (contrat appelant).
    pub fn new(shape: Vec<Value>, data: Vec<Value>) -> Self {
        let mut taille: Option<usize> = Some(1);
        for d in &shape {
            let Some(d) = dimension(d) else {
                panic!("matrix dimension must be a non-negative Int: {d:?}");
            };
            taille = taille.and_then(|t| t.checked_mul(d));
        }
        assert_eq!(taille, Some(data.len()), "matrix shape mismatch");
        Matrix { shape, data }
    }

    /// Matrice 1×1.
    pub fn scalar(v: Value) -> Self {
        Matrix::new(vec![Value::Int(1), Value::Int(1)], vec![v])
    }

    pub fn shape(&self) -> &[Value] {
        &self.shape
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }
}

/* ------------------------ Valeur ------------------------ */

fn format_entier(n: &BigInt, config: &Config) -> FormatResult<String> {
    if config.output_template().is_none() {
        return Ok(format_bigint(n, config));
    }
    if let Some((verb, prec)) = config.float_format() {
        return float_string(&BigRat::from_integer(n.clone()), verb, prec);
    }
    gabarit::apply(config.output_template().unwrap_or("%v"), &[n], config)
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::BigRat(_) => ValueKind::BigRat,
            Value::Vector(_) => ValueKind::Vector,
            Value::Matrix(_) => ValueKind::Matrix,
        }
    }

    /// Les scalaires sont déjà en forme normale ; vecteurs/matrices élément par élément.
    pub fn eval(&self, ctx: &Context<'_>) -> Value {
        match self {
            Value::Int(_) | Value::BigInt(_) => self.clone(),
            Value::BigRat(r) => r.eval(ctx),
            Value::Vector(v) => {
                Value::Vector(Vector::new(v.elems().iter().map(|e| e.eval(ctx)).collect()))
            }
            Value::Matrix(m) => Value::Matrix(Matrix::new(
                m.shape().to_vec(),
                m.data().iter().map(|e| e.eval(ctx)).collect(),
            )),
        }
    }

    /// Plus petite représentation exacte.
    pub fn shrink(self) -> Value {
        match self {
            Value::Int(_) | Value::Vector(_) | Value::Matrix(_) => self,
            Value::BigInt(e) => e.shrink(),
            Value::BigRat(r) => r.shrink(),
        }
    }

    pub fn try_to_type(&self, which: ValueKind) -> Result<Value, NarrowingError> {
        let refus = || NarrowingError::InvalidNarrowing {
            from: self.kind(),
            to: which,
        };
        match (self, which) {
            (Value::BigRat(r), _) => r.try_to_type(which),

            (Value::Int(_), ValueKind::Int) | (Value::BigInt(_), ValueKind::BigInt) => {
                Ok(self.clone())
            }
            (Value::Int(i), ValueKind::BigInt) => Ok(Value::BigInt(Entier::new(BigInt::from(*i)))),
            (Value::Int(i), ValueKind::BigRat) => {
                Ok(Value::BigRat(BigRat::from_integer(BigInt::from(*i))))
            }
            (Value::BigInt(e), ValueKind::BigRat) => {
                Ok(Value::BigRat(BigRat::from_integer(e.as_bigint().clone())))
            }
            (Value::Int(_) | Value::BigInt(_), ValueKind::Vector) => {
                Ok(Value::Vector(Vector::new(vec![self.clone()])))
            }
            (Value::Int(_) | Value::BigInt(_), ValueKind::Matrix) => {
                Ok(Value::Matrix(Matrix::scalar(self.clone())))
            }
            (Value::BigInt(_), ValueKind::Int) => Err(refus()),

            (Value::Vector(_), ValueKind::Vector) | (Value::Matrix(_), ValueKind::Matrix) => {
                Ok(self.clone())
            }
            (Value::Vector(v), ValueKind::Matrix) => {
                let colonnes = i64::try_from(v.len()).map_err(|_| refus())?;
                Ok(Value::Matrix(Matrix::new(
                    vec![Value::Int(1), Value::Int(colonnes)],
                    v.elems().to_vec(),
                )))
            }
            (Value::Vector(_) | Value::Matrix(_), _) => Err(refus()),
        }
    }

    /// Conversion de type ; une conversion impossible est une erreur de programmation (panic).
    pub fn to_type(&self, which: ValueKind) -> Value {
        if let Value::BigRat(r) = self {
            return r.to_type(which);
        }
        match self.try_to_type(which) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Texte selon la config : vecteurs séparés par des espaces, matrices ligne par ligne.
    pub fn to_string_with(&self, config: &Config) -> FormatResult<String> {
        match self {
            Value::Int(i) => format_entier(&BigInt::from(*i), config),
            Value::BigInt(e) => format_entier(e.as_bigint(), config),
            Value::BigRat(r) => format_rat(r, config),
            Value::Vector(v) => {
                let parts = v
                    .elems()
                    .iter()
                    .map(|e| e.to_string_with(config))
                    .collect::<FormatResult<Vec<_>>>()?;
                Ok(parts.join(" "))
            }
            Value::Matrix(m) => {
                let parts = m
                    .data()
                    .iter()
                    .map(|e| e.to_string_with(config))
                    .collect::<FormatResult<Vec<_>>>()?;
                let colonnes = m.shape().last().and_then(dimension).unwrap_or(0);
                if m.shape().len() != 2 || colonnes == 0 {
                    return Ok(parts.join(" "));
                }
                let lignes: Vec<String> = parts.chunks(colonnes).map(|l| l.join(" ")).collect();
                Ok(lignes.join("\n"))
            }
        }
    }
}

impl From<BigRat> for Value {
    fn from(r: BigRat) -> Self {
        Value::BigRat(r)
    }
}
