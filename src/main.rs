// src/main.rs
//
// Calculatrice scientifique — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native, ou `--expr` en ligne de commande
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice scientifique";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use calculatrice_sci::noyau::{self, AngleMode};
    use calculatrice_sci::reglages::Reglages;
    use clap::Parser;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    use super::{egui, AppCalc, TITRE_APP};

    #[derive(Parser, Debug)]
    #[command(name = "calculatrice_sci", version, about = "Calculatrice scientifique")]
    pub struct Args {
        /// Fichier de réglages TOML
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Évalue une expression et quitte (sans interface graphique)
        #[arg(long)]
        pub expr: Option<String>,

        /// Force le mode degrés
        #[arg(long)]
        pub deg: bool,

        /// Affiche la valeur sans arrondi de présentation
        #[arg(long)]
        pub brut: bool,
    }

    fn init_tracing() {
        let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filtre)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn lancer() -> ExitCode {
        let args = Args::parse();
        init_tracing();

        let mut reglages = Reglages::charger_ou_defaut(args.config.as_deref());
        if args.deg {
            reglages.mode_angle = AngleMode::Degrees;
        }
        if args.brut {
            reglages.arrondi_affichage = false;
        }

        if let Some(source) = args.expr {
            return evaluer_une_fois(&source, &reglages);
        }

        info!(mode = reglages.mode_angle.libelle(), "démarrage de l’interface");
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([520.0, 740.0])
                .with_min_inner_size([420.0, 620.0]),
            ..Default::default()
        };

        let res = eframe::run_native(
            TITRE_APP,
            options,
            Box::new(move |_cc| Ok(Box::new(AppCalc::depuis_reglages(&reglages)))),
        );
        match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(erreur = %e, "interface graphique");
                ExitCode::FAILURE
            }
        }
    }

    fn evaluer_une_fois(source: &str, reglages: &Reglages) -> ExitCode {
        match noyau::evaluate(source, reglages.mode_angle) {
            Ok(v) => {
                println!("{}", noyau::format_resultat(v, reglages.arrondi_affichage));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Erreur : {e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    natif::lancer()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus (réglages par défaut)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
