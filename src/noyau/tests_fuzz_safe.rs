//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : Ok(v) => v fini, et relire format_resultat(v) redonne v
//! - toute erreur est typée (jamais de panique)

use std::time::{Duration, Instant};

use super::{eval_expression, evaluate, format_resultat, AngleMode, EvaluatorError};

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
    fn mode(&mut self) -> AngleMode {
        if self.coin() {
            AngleMode::Degrees
        } else {
            AngleMode::Radians
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_ok(expr: &str, mode: AngleMode, v: f64) {
    assert!(v.is_finite(), "valeur non finie: expr={expr:?} v={v}");

    let texte = format_resultat(v, false);
    let relu = evaluate(&texte, mode)
        .unwrap_or_else(|e| panic!("relecture impossible: expr={expr:?} texte={texte:?} err={e}"));
    assert_eq!(relu, v, "idempotence: expr={expr:?} texte={texte:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (utile pour tester la division par zéro)
    let a = rng.pick(13);
    if rng.coin() {
        format!("{a}.{}", rng.pick(100))
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => gen_nombre(rng),
        2 => "pi".to_string(),
        3 => "e".to_string(),
        4 => "π".to_string(),
        _ => format!("{}!", rng.pick(8)),
    }
}

const FONCTIONS: [&str; 14] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "abs", "floor", "ceil",
    "round", "fact",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{}/{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        7 => format!("({})!", gen_expr(rng, depth - 1)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            if f == "sqrt" && rng.coin() {
                format!("√({})", gen_expr(rng, depth - 1))
            } else {
                format!("{f}({})", gen_expr(rng, depth - 1))
            }
        }
    }
}

/* ------------------------ Oracle infixe (sous-ensemble sans fonctions) ------------------------ */

/// Valeur attendue : None si une erreur est attendue (division par zéro, non fini).
type Attendu = Option<f64>;

fn combiner(a: Attendu, b: Attendu, op: char) -> Attendu {
    let (a, b) = (a?, b?);
    let v = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => {
            if b == 0.0 {
                return None;
            }
            a / b
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn gen_atome_oracle(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth > 0 && rng.pick(3) == 0 {
        let (s, v) = gen_chaine_oracle(rng, depth - 1);
        return (format!("({s})"), v);
    }
    let s = gen_nombre(rng);
    let v: f64 = s.parse().unwrap();
    (s, Some(v))
}

/// terme := atome | -atome | atome^k | -atome^k  (le '-' est sous '^')
fn gen_terme_oracle(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    let (s, v) = gen_atome_oracle(rng, depth);
    let moins = rng.pick(3) == 0;
    let (s, v) = if moins {
        (format!("-{s}"), v.map(|x| -x))
    } else {
        (s, v)
    };
    if rng.pick(4) == 0 {
        let k = rng.pick(4);
        let p = v.map(|x| x.powf(f64::from(k))).filter(|x| x.is_finite());
        (format!("{s}^{k}"), p)
    } else {
        (s, v)
    }
}

/// t0 op t1 op ... avec la précédence usuelle (* / avant + -), gauche à droite.
fn gen_chaine_oracle(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    const OPS: [char; 4] = ['+', '-', '*', '/'];

    let (mut texte, premier) = gen_terme_oracle(rng, depth);
    let mut somme: Attendu = None;
    let mut signe = '+';
    let mut produit = premier;
    let mut premier_groupe = true;

    for _ in 0..rng.pick(4) {
        let op = OPS[rng.pick(4) as usize];
        let (s, v) = gen_terme_oracle(rng, depth);
        texte.push(op);
        texte.push_str(&s);

        if op == '*' || op == '/' {
            produit = combiner(produit, v, op);
        } else {
            somme = if premier_groupe {
                produit
            } else {
                combiner(somme, produit, signe)
            };
            premier_groupe = false;
            signe = op;
            produit = v;
        }
    }

    let total = if premier_groupe {
        produit
    } else {
        combiner(somme, produit, signe)
    };
    (texte, total)
}

/// Entrée “poubelle” : alphabet du noyau + quelques intrus.
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: [&str; 24] = [
        "1", "2", "0", ".", "+", "-", "*", "/", "^", "!", "(", ")", " ", "pi", "e", "π", "√",
        "sin", "ln", "fact", "x", "$", "é", ",",
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_idempotence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = rng.mode();

        // Même entrée => même sortie (pas d’état caché)
        let a = eval_expression(&expr, mode).map(|c| c.valeur);
        let b = evaluate(&expr, mode);
        assert_eq!(a, b, "non déterministe: expr={expr:?}");

        match a {
            Ok(v) => {
                check_ok(&expr, mode, v);
                seen_ok += 1;
            }
            Err(e) => {
                // grammaire générée toujours valide, noms toujours connus
                assert!(
                    matches!(
                        e,
                        EvaluatorError::DomainError { .. } | EvaluatorError::OverflowError
                    ),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let longueur = 1 + rng.pick(20) as usize;
        let expr = gen_bruit(&mut rng, longueur);
        let mode = rng.mode();

        if let Ok(v) = evaluate(&expr, mode) {
            check_ok(&expr, mode, v);
        }
    }
}

#[test]
fn fuzz_safe_angles_degres_dans_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    for k in -24..=24 {
        budget(t0, max);

        let angle: i32 = k * 15;
        for f in ["sin", "cos"] {
            let expr = format!("{f}({angle})");
            let v = evaluate(&expr, AngleMode::Degrees)
                .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
            assert!((-1.0..=1.0).contains(&v), "expr={expr:?} v={v}");
        }

        // tan : indéfini seulement à 90° + k·180°
        let expr = format!("tan({angle})");
        let r = evaluate(&expr, AngleMode::Degrees);
        if angle.rem_euclid(180) == 90 {
            assert!(
                matches!(r, Err(EvaluatorError::DomainError { .. })),
                "expr={expr:?}"
            );
        } else {
            assert!(r.is_ok(), "expr={expr:?} r={r:?}");
        }
    }
}

#[test]
fn fuzz_safe_oracle_infixe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0x1F1_u64);
    let mut comparees = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let (expr, attendu) = gen_chaine_oracle(&mut rng, 3);
        let obtenu = evaluate(&expr, rng.mode());

        match attendu {
            Some(v) => {
                assert_eq!(obtenu, Ok(v), "expr={expr:?}");
                comparees += 1;
            }
            None => assert!(
                matches!(
                    obtenu,
                    Err(EvaluatorError::DomainError { .. } | EvaluatorError::OverflowError)
                ),
                "expr={expr:?} obtenu={obtenu:?}"
            ),
        }
    }

    assert!(comparees > 150, "trop peu de comparaisons: {comparees}");
}
