// src/noyau/erreur.rs
//
// Taxonomie d’erreurs du noyau (partagée jetons / parseur / évaluation).
// - Toutes récupérables : le front-end affiche "Erreur" et garde l’entrée.
// - Positions = index de caractère (pas d’octet) dans la source.

use thiserror::Error;

/// Raison précise d’une erreur de domaine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DomainReason {
    #[error("division par zéro")]
    DivisionByZero,

    #[error("racine carrée d’un nombre négatif")]
    NegativeSqrt,

    #[error("logarithme d’un nombre non positif")]
    NonPositiveLog,

    #[error("factorielle d’un nombre négatif ou non entier")]
    InvalidFactorial,

    #[error("puissance non entière d’une base négative")]
    NegativeBaseFractionalExponent,

    #[error("argument hors de [-1, 1] pour {0}")]
    InverseTrigOutOfRange(&'static str),

    #[error("tangente indéfinie")]
    UndefinedTangent,

    #[error("résultat indéfini")]
    NotANumber,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluatorError {
    /// Flux de jetons mal formé ou grammaire violée.
    #[error("erreur de syntaxe (position {position}) : {message}")]
    SyntaxError { position: usize, message: String },

    /// Identifiant ni constante ni fonction connue.
    #[error("nom inconnu : {identifier}")]
    NameError { identifier: String },

    #[error("erreur de domaine : {reason}")]
    DomainError { reason: DomainReason },

    /// Résultat hors de la plage représentable (f64 fini).
    #[error("dépassement de capacité")]
    OverflowError,
}

impl EvaluatorError {
    pub fn syntaxe(position: usize, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            position,
            message: message.into(),
        }
    }

    pub fn nom(identifier: impl Into<String>) -> Self {
        Self::NameError {
            identifier: identifier.into(),
        }
    }
}

impl From<DomainReason> for EvaluatorError {
    fn from(reason: DomainReason) -> Self {
        Self::DomainError { reason }
    }
}

/// Alias pratique pour tout le noyau.
pub type Resultat<T> = Result<T, EvaluatorError>;
