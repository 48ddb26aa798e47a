//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> parse -> ExpressionNode -> evaluate_tree(mode) -> f64 fini
//!
//! Remarque : fonction pure de (source, mode). Seule la table des symboles
//! (lecture seule) est partagée entre appels.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use tracing::debug;

use super::erreur::{DomainReason, EvaluatorError, Resultat};
use super::expr::{BinaryOp, ExpressionNode, UnaryOp};
use super::jetons::{format_tokens, tokenize};
use super::parseur::parse;
use super::symboles::{est_entier, Angulaire, Fonction, FunctionSpec, SymbolTable};
use super::trig::{trig_directe, AngleMode, TrigFn};

/// Plus grand n tel que n! reste fini en f64.
pub const FACTORIELLE_MAX: u32 = 170;

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
}

#[derive(Clone, Debug)]
pub struct Calcul {
    pub valeur: f64,
    pub demarche: Demarche,
}

/// API publique : le seul appel dont une UI a besoin pour "=".
pub fn evaluate(source: &str, mode: AngleMode) -> Resultat<f64> {
    eval_expression(source, mode).map(|c| c.valeur)
}

/// Comme `evaluate`, avec la démarche (jetons + arbre) pour le panneau d’explication.
pub fn eval_expression(source: &str, mode: AngleMode) -> Resultat<Calcul> {
    let resultat = pipeline(source, mode);
    match &resultat {
        Ok(c) => debug!(source, mode = mode.libelle(), valeur = c.valeur, "évaluation réussie"),
        Err(e) => debug!(source, mode = mode.libelle(), erreur = %e, "évaluation refusée"),
    }
    resultat
}

fn pipeline(source: &str, mode: AngleMode) -> Resultat<Calcul> {
    // 1) Jetons
    let jetons = tokenize(source)?;

    // 2) Arbre
    let arbre = parse(&jetons)?;

    // 3) Valeur
    let valeur = evaluate_tree(&arbre, mode)?;

    Ok(Calcul {
        valeur,
        demarche: Demarche {
            jetons: format_tokens(&jetons),
            arbre: arbre.to_string(),
        },
    })
}

/// Réduit l’arbre. Toute erreur d’un sous-arbre interrompt tout.
pub fn evaluate_tree(arbre: &ExpressionNode, mode: AngleMode) -> Resultat<f64> {
    let table = SymbolTable::standard();
    let v = evaluer(arbre, mode, table)?;
    fini(v)
}

/// Étape de la réduction (parcours postfixe).
enum Tache<'a> {
    Visiter(&'a ExpressionNode),
    Reduire(&'a ExpressionNode),
}

/// Itératif : pile explicite, la profondeur de l’arbre ne touche pas la pile d’appels.
/// Gauche avant droite : la première erreur rencontrée à gauche l’emporte.
fn evaluer(racine: &ExpressionNode, mode: AngleMode, table: &SymbolTable) -> Resultat<f64> {
    use ExpressionNode::*;

    let mut taches = vec![Tache::Visiter(racine)];
    let mut valeurs: Vec<f64> = Vec::new();

    while let Some(tache) = taches.pop() {
        match tache {
            Tache::Visiter(e) => match e {
                Number(v) => valeurs.push(*v),

                Constant(nom) => {
                    let v = table
                        .lookup_constant(nom)
                        .ok_or_else(|| EvaluatorError::nom(nom.as_str()))?;
                    valeurs.push(v);
                }

                Unary(_, x) | Factorial(x) => {
                    taches.push(Tache::Reduire(e));
                    taches.push(Tache::Visiter(x));
                }

                Binary(_, a, b) => {
                    taches.push(Tache::Reduire(e));
                    taches.push(Tache::Visiter(b));
                    taches.push(Tache::Visiter(a));
                }

                // nom inconnu : l’argument n’est pas évalué
                Call(nom, x) => {
                    if table.lookup_function(nom).is_none() {
                        return Err(EvaluatorError::nom(nom.as_str()));
                    }
                    taches.push(Tache::Reduire(e));
                    taches.push(Tache::Visiter(x));
                }
            },

            Tache::Reduire(e) => {
                let v = match e {
                    Unary(UnaryOp::Neg, _) => -depiler(&mut valeurs)?,
                    Factorial(_) => factorielle(depiler(&mut valeurs)?)?,
                    Binary(op, _, _) => {
                        let b = depiler(&mut valeurs)?;
                        let a = depiler(&mut valeurs)?;
                        binaire(*op, a, b)?
                    }
                    Call(nom, _) => {
                        let spec = table
                            .lookup_function(nom)
                            .ok_or_else(|| EvaluatorError::nom(nom.as_str()))?;
                        appliquer(spec, depiler(&mut valeurs)?, mode)?
                    }
                    // feuilles : jamais planifiées en réduction
                    Number(_) | Constant(_) => continue,
                };
                valeurs.push(v);
            }
        }
    }

    depiler(&mut valeurs)
}

fn depiler(valeurs: &mut Vec<f64>) -> Resultat<f64> {
    valeurs
        .pop()
        .ok_or_else(|| EvaluatorError::syntaxe(0, "arbre incomplet"))
}

/// Un résultat intermédiaire doit rester un f64 fini.
fn fini(v: f64) -> Resultat<f64> {
    if v.is_nan() {
        Err(DomainReason::NotANumber.into())
    } else if v.is_infinite() {
        Err(EvaluatorError::OverflowError)
    } else {
        Ok(v)
    }
}

fn binaire(op: BinaryOp, a: f64, b: f64) -> Resultat<f64> {
    let v = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(DomainReason::DivisionByZero.into());
            }
            a / b
        }
        BinaryOp::Pow => puissance(a, b)?,
    };
    fini(v)
}

fn puissance(base: f64, exposant: f64) -> Resultat<f64> {
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(DomainReason::NegativeBaseFractionalExponent.into());
    }
    if base == 0.0 && exposant < 0.0 {
        return Err(DomainReason::DivisionByZero.into());
    }
    Ok(base.powf(exposant))
}

fn appliquer(spec: &FunctionSpec, x: f64, mode: AngleMode) -> Resultat<f64> {
    spec.verifier_domaine(x)?;

    let v = match spec.fonction {
        Fonction::Sin => trig_directe(TrigFn::Sin, x, mode)?,
        Fonction::Cos => trig_directe(TrigFn::Cos, x, mode)?,
        Fonction::Tan => trig_directe(TrigFn::Tan, x, mode)?,
        Fonction::Asin => x.asin(),
        Fonction::Acos => x.acos(),
        Fonction::Atan => x.atan(),
        Fonction::Log => x.log10(),
        Fonction::Ln => x.ln(),
        Fonction::Sqrt => x.sqrt(),
        Fonction::Abs => x.abs(),
        Fonction::Floor => x.floor(),
        Fonction::Ceil => x.ceil(),
        // demi-pair : round(2.5) = 2
        Fonction::Round => x.round_ties_even(),
        Fonction::Fact => factorielle(x)?,
        // Le parseur refuse `pow(...)` : arité 2, seulement via '^'
        Fonction::Pow => {
            return Err(EvaluatorError::syntaxe(0, "'pow' s’écrit avec l’opérateur '^'"));
        }
    };

    let v = if spec.angulaire == Angulaire::Resultat {
        mode.depuis_radians(v)
    } else {
        v
    };
    fini(v)
}

/// n! par produit itératif exact (BigUint), puis conversion f64.
/// - négatif / non entier => DomainError
/// - n > FACTORIELLE_MAX => OverflowError (borne le travail)
pub fn factorielle(x: f64) -> Resultat<f64> {
    if !est_entier(x) || x.round() < 0.0 {
        return Err(DomainReason::InvalidFactorial.into());
    }
    let n = x.round();
    if n > f64::from(FACTORIELLE_MAX) {
        return Err(EvaluatorError::OverflowError);
    }
    // n ∈ [0, 170] : conversion sûre
    let n = n as u32;

    let mut produit = BigUint::one();
    for k in 2..=n {
        produit *= k;
    }

    let v = produit.to_f64().ok_or(EvaluatorError::OverflowError)?;
    fini(v)
}
