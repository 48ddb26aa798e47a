// src/noyau/symboles.rs
//
// Table des symboles : constantes + fonctions autorisées.
// - Construite une seule fois (OnceLock), jamais mutée ensuite.
// - Partageable entre threads sans verrou (lecture seule).
// - Ensemble FERMÉ : tout autre nom => NameError.

use std::collections::HashMap;
use std::f64::consts::{E, PI};
use std::sync::OnceLock;

use super::erreur::DomainReason;

/// Fonctions connues du noyau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Pow,
    Fact,
}

/// Contrainte de domaine vérifiée AVANT d’appliquer la fonction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domaine {
    /// Tout réel fini.
    Total,
    /// x >= 0
    Positif,
    /// x > 0
    StrictementPositif,
    /// |x| <= 1
    Unitaire,
    /// Entier naturel (tolérance) ; la borne haute est vérifiée par la factorielle.
    EntierNaturel,
}

/// Rôle vis-à-vis du mode d’angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Angulaire {
    Aucun,
    /// L’argument est un angle (sin/cos/tan).
    Argument,
    /// Le résultat est un angle (asin/acos/atan).
    Resultat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub fonction: Fonction,
    pub arity: u8,
    pub domaine: Domaine,
    pub angulaire: Angulaire,
}

/// Tolérance “est un entier” (factorielle).
pub const TOLERANCE_ENTIER: f64 = 1e-9;

pub fn est_entier(x: f64) -> bool {
    x.is_finite() && (x - x.round()).abs() < TOLERANCE_ENTIER
}

impl FunctionSpec {
    /// Vérifie la contrainte de domaine pour l’argument `x`.
    pub fn verifier_domaine(&self, x: f64) -> Result<(), DomainReason> {
        let ok = match self.domaine {
            Domaine::Total => true,
            Domaine::Positif => x >= 0.0,
            Domaine::StrictementPositif => x > 0.0,
            Domaine::Unitaire => (-1.0..=1.0).contains(&x),
            Domaine::EntierNaturel => est_entier(x) && x.round() >= 0.0,
        };
        if ok {
            return Ok(());
        }
        Err(match self.domaine {
            Domaine::Positif => DomainReason::NegativeSqrt,
            Domaine::StrictementPositif => DomainReason::NonPositiveLog,
            Domaine::Unitaire => DomainReason::InverseTrigOutOfRange(self.name),
            Domaine::EntierNaturel => DomainReason::InvalidFactorial,
            Domaine::Total => DomainReason::NotANumber,
        })
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    constantes: HashMap<&'static str, f64>,
    fonctions: HashMap<&'static str, FunctionSpec>,
}

impl SymbolTable {
    fn construire() -> Self {
        use Angulaire as A;
        use Domaine as D;
        use Fonction as F;

        let mut constantes = HashMap::new();
        constantes.insert("pi", PI);
        constantes.insert("e", E);

        let liste: [(&'static str, F, u8, D, A); 15] = [
            ("sin", F::Sin, 1, D::Total, A::Argument),
            ("cos", F::Cos, 1, D::Total, A::Argument),
            ("tan", F::Tan, 1, D::Total, A::Argument),
            ("asin", F::Asin, 1, D::Unitaire, A::Resultat),
            ("acos", F::Acos, 1, D::Unitaire, A::Resultat),
            ("atan", F::Atan, 1, D::Total, A::Resultat),
            ("log", F::Log, 1, D::StrictementPositif, A::Aucun),
            ("ln", F::Ln, 1, D::StrictementPositif, A::Aucun),
            ("sqrt", F::Sqrt, 1, D::Positif, A::Aucun),
            ("abs", F::Abs, 1, D::Total, A::Aucun),
            ("floor", F::Floor, 1, D::Total, A::Aucun),
            ("ceil", F::Ceil, 1, D::Total, A::Aucun),
            ("round", F::Round, 1, D::Total, A::Aucun),
            // Forme historique : accessible seulement via '^'
            ("pow", F::Pow, 2, D::Total, A::Aucun),
            ("fact", F::Fact, 1, D::EntierNaturel, A::Aucun),
        ];

        let fonctions = liste
            .into_iter()
            .map(|(name, fonction, arity, domaine, angulaire)| {
                (
                    name,
                    FunctionSpec {
                        name,
                        fonction,
                        arity,
                        domaine,
                        angulaire,
                    },
                )
            })
            .collect();

        Self {
            constantes,
            fonctions,
        }
    }

    /// Instance unique du processus.
    pub fn standard() -> &'static SymbolTable {
        static TABLE: OnceLock<SymbolTable> = OnceLock::new();
        TABLE.get_or_init(Self::construire)
    }

    pub fn lookup_constant(&self, name: &str) -> Option<f64> {
        self.constantes.get(name).copied()
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionSpec> {
        self.fonctions.get(name)
    }

    /// Noms de fonctions triés (pour l’aide / le front-end).
    pub fn noms_fonctions(&self) -> Vec<&'static str> {
        let mut v: Vec<_> = self.fonctions.keys().copied().collect();
        v.sort_unstable();
        v
    }
}
