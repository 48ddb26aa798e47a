//! Tests scientifiques (campagne) : propriétés + robustesse + limites contrôlées.
//!
//! But : vérifier les invariants du noyau sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - comparaisons flottantes à tolérance explicite

use std::time::{Duration, Instant};

use super::{
    evaluate, format_resultat, format_tokens, parse, tokenize, AngleMode, DomainReason,
    EvaluatorError,
};

fn eval_ok(expr: &str, mode: AngleMode) -> f64 {
    evaluate(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: AngleMode, attendu: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} valeur={v} attendu={attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence_standard() {
    let r = AngleMode::Radians;
    // (expression, valeur infixe attendue)
    let cas: [(&str, f64); 10] = [
        ("2+3*4", 14.0),
        ("2*3+4", 10.0),
        ("2^3^2", 512.0),
        ("2*3^2", 18.0),
        ("(2*3)^2", 36.0),
        ("100/10/5", 2.0),
        ("2-3-4", -5.0),
        ("2+3*4^2/8-1", 7.0),
        ("4^0.5*3", 6.0),
        ("1-2*3+4/2", -3.0),
    ];
    for (s, v) in cas {
        assert_eq!(eval_ok(s, r), v, "expr={s:?}");
    }
}

#[test]
fn sci_factorielle_notation() {
    let r = AngleMode::Radians;
    assert_eq!(eval_ok("5!", r), 120.0);
    assert_eq!(eval_ok("(2+3)!", r), 120.0);
    assert_eq!(eval_ok("-5!", r), -120.0);
    // chaînées et imbriquées
    assert_eq!(eval_ok("(3!)!", r), 720.0);
    assert_eq!(eval_ok("((1+2)!+1)!", r), 5040.0);
    assert_eq!(eval_ok("2^3!", r), 64.0);
    assert_eq!(eval_ok("3!^2", r), 36.0);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_taxonomie_erreurs() {
    let r = AngleMode::Radians;
    assert_eq!(
        evaluate("5/0", r),
        Err(EvaluatorError::DomainError {
            reason: DomainReason::DivisionByZero
        })
    );
    assert!(matches!(
        evaluate("sqrt(-1)", r),
        Err(EvaluatorError::DomainError { .. })
    ));
    assert!(matches!(
        evaluate("xyz(1)", r),
        Err(EvaluatorError::NameError { .. })
    ));
    assert!(matches!(
        evaluate("(1+2", r),
        Err(EvaluatorError::SyntaxError { position: 0, .. })
    ));
    assert!(matches!(
        evaluate("1 + (2 * (3 + 4)", r),
        Err(EvaluatorError::SyntaxError { position: 4, .. })
    ));
    assert_eq!(evaluate("200!", r), Err(EvaluatorError::OverflowError));
}

#[test]
fn sci_noms_inconnus_jamais_zero() {
    for s in ["xyz(1)", "foo", "2*bar", "sinus(30)", "exp(1)", "x+1"] {
        for mode in [AngleMode::Degrees, AngleMode::Radians] {
            assert!(
                matches!(evaluate(s, mode), Err(EvaluatorError::NameError { .. })),
                "expr={s:?}"
            );
        }
    }
}

/* ------------------------ Mode d’angle ------------------------ */

#[test]
fn sci_trig_modes() {
    assert_proche("sin(30)", AngleMode::Degrees, 0.5);
    assert_proche("sin(pi/2)", AngleMode::Radians, 1.0);
    assert_proche("cos(pi)", AngleMode::Radians, -1.0);
    assert_proche("tan(45)", AngleMode::Degrees, 1.0);
    assert_proche("asin(0.5)", AngleMode::Degrees, 30.0);
    assert_proche("atan(1)*4", AngleMode::Radians, std::f64::consts::PI);
    // même source, modes différents
    let deg = eval_ok("sin(90)", AngleMode::Degrees);
    let rad = eval_ok("sin(90)", AngleMode::Radians);
    assert_eq!(deg, 1.0);
    assert!((rad - 90f64.sin()).abs() < 1e-12);
}

#[test]
fn sci_identites_trig() {
    // sin²+cos² = 1 sur quelques angles quelconques
    for a in ["10", "33.3", "-71", "200"] {
        let s = format!("sin({a})^2 + cos({a})^2");
        assert_proche(&s, AngleMode::Degrees, 1.0);
        assert_proche(&s, AngleMode::Radians, 1.0);
    }
}

/* ------------------------ Idempotence du formatage ------------------------ */

#[test]
fn sci_idempotence_resultat() {
    let exprs = [
        "2+3*4",
        "1/3",
        "-5!",
        "sqrt(2)",
        "pi*1000000",
        "e^-20",
        "0.1+0.2",
        "-(0)",
        "2^60",
        "170!",
        "ln(2)/7",
    ];
    for mode in [AngleMode::Degrees, AngleMode::Radians] {
        for s in exprs {
            let v = eval_ok(s, mode);
            let texte = format_resultat(v, false);
            let relu = eval_ok(&texte, mode);
            assert_eq!(relu, v, "expr={s:?} texte={texte:?}");
        }
    }
}

/* ------------------------ Aller-retour jetons ------------------------ */

#[test]
fn sci_aller_retour_jetons() {
    let sources = [
        "2+3*4",
        "  √(16)  !",
        "SIN(π/6)^2",
        "-(1.5)!*e",
        "log(100)/ln(e)",
    ];
    for s in sources {
        let t1 = tokenize(s).unwrap();
        let canon = format_tokens(&t1);
        let t2 = tokenize(&canon).unwrap();

        let k1: Vec<_> = t1.iter().map(|t| (t.kind, t.text.as_str())).collect();
        let k2: Vec<_> = t2.iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(k1, k2, "source={s:?}");

        // même arbre des deux côtés
        assert_eq!(parse(&t1), parse(&t2), "source={s:?}");
    }
}

#[test]
fn sci_arbre_affiche_relisible() {
    for s in ["2+3*4", "-5!", "2^3^2", "sin(pi/2)*-e", "((1+2)!)!"] {
        let arbre = parse(&tokenize(s).unwrap()).unwrap();
        let texte = arbre.to_string();
        let relu = parse(&tokenize(&texte).unwrap()).unwrap();
        assert_eq!(relu, arbre, "source={s:?} texte={texte:?}");
    }
}

/* ------------------------ Concurrence (sans état partagé mutable) ------------------------ */

#[test]
fn sci_appels_concurrents() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let mode = if i % 2 == 0 {
                    AngleMode::Degrees
                } else {
                    AngleMode::Radians
                };
                (0..200)
                    .map(|k| evaluate(&format!("sin({k})+{k}!/{k}!"), mode))
                    .filter(Result::is_ok)
                    .count()
            })
        })
        .collect();

    for h in handles {
        // k = 0..199 : toutes valides (171! déborde => erreurs attendues au-delà de 170)
        assert_eq!(h.join().unwrap(), 171);
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = "1".to_string();
    for _ in 0..100 {
        expr = format!("abs(({expr}))");
        budget(t0, max);
    }
    assert_eq!(eval_ok(&expr, AngleMode::Radians), 1.0);
}

#[test]
fn sci_stress_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["0.5"; 1000].join(" + ");
    budget(t0, max);
    assert_eq!(eval_ok(&expr, AngleMode::Radians), 500.0);
    budget(t0, max);
}
