// src/app.rs
//
// Calculatrice Aperçu : module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Traduire le clavier en `Commande` (il n’y a pas de champ texte egui)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use etat::Commande;

/// Touches spéciales reconnues, dans l’ordre de traitement.
const TOUCHES: [(egui::Key, Commande); 8] = [
    (egui::Key::ArrowLeft, Commande::Deplacer(-1)),
    (egui::Key::ArrowRight, Commande::Deplacer(1)),
    (egui::Key::Home, Commande::Debut),
    (egui::Key::End, Commande::Fin),
    (egui::Key::Backspace, Commande::EffacerAvant),
    (egui::Key::Delete, Commande::EffacerApres),
    (egui::Key::Enter, Commande::Evaluer),
    (egui::Key::Escape, Commande::Vider),
];

/// Un caractère tapé : "=" valide, le reste est inséré tel quel.
fn commande_texte(c: char) -> Commande {
    match c {
        '=' => Commande::Evaluer,
        _ => Commande::Inserer(c.to_string()),
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let commandes: Vec<Commande> = ctx.input(|i| {
            let mut out = Vec::new();
            for ev in &i.events {
                if let egui::Event::Text(t) = ev {
                    out.extend(t.chars().filter(|c| !c.is_control()).map(commande_texte));
                }
            }
            for (touche, commande) in TOUCHES {
                if i.key_pressed(touche) {
                    out.push(commande);
                }
            }
            out
        });

        for c in commandes {
            self.appliquer(c);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
