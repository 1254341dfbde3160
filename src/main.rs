use anyhow::{bail, Context, Result};
use clap::Parser;

use panel_layout::config::EngineConfig;
use panel_layout::panel::known_views;
use panel_layout::store::{FileStorage, LayoutStore};
use panel_layout::style::{builtin_presets, find_preset};
use panel_layout::theme::{resolve_effective_color, ColorChannel, ThemeDefaults};
use panel_layout::PanelConfig;

mod cli;

use cli::{CliArgs, Command};

fn describe_panel(panel: &PanelConfig, theme: &ThemeDefaults) -> String {
    let mut flags = Vec::new();
    if !panel.visible {
        flags.push("hidden");
    }
    if panel.collapsed {
        flags.push("collapsed");
    }

    let style = match &panel.style {
        Some(style) => format!(
            " bg={} text={}",
            resolve_effective_color(Some(style), ColorChannel::Background, theme).to_hex(),
            resolve_effective_color(Some(style), ColorChannel::Text, theme).to_hex(),
        ),
        None => String::new(),
    };

    format!(
        "{:>3}  {:<20} {}{}{}",
        panel.order,
        panel.id,
        panel.title,
        if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        },
        style
    )
}

fn print_view(store: &LayoutStore, view: &str, theme: &ThemeDefaults) {
    let panels = store.panels(view);
    if panels.is_empty() {
        println!("{}: no panels", view);
        return;
    }
    println!("{}:", view);
    for panel in panels {
        println!("{}", describe_panel(panel, theme));
    }
}

/// Report a no-op without failing; stale ids are not an error for the store
fn report(changed: bool, what: &str) {
    if !changed {
        eprintln!("Nothing changed ({})", what);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    if let Some(dir) = args.storage_dir {
        config.storage_dir = Some(dir);
    }

    let theme = config.theme_defaults();
    let storage: FileStorage = config
        .storage()
        .context("No config directory available; pass --storage-dir")?;
    tracing::debug!("Using layout storage in {}", storage.dir().display());
    let mut store = LayoutStore::load(Box::new(storage), config.layout_options());

    match args.command {
        Command::Views => {
            for view in known_views() {
                let visible = store.layout(view).map_or(0, |l| l.visible_count());
                println!("{:<24} {} visible", view, visible);
            }
        }
        Command::Show { view } => print_view(&store, &view, &theme),
        Command::Toggle { view, panel } => {
            report(store.toggle_panel_visibility(&view, &panel), "unknown view or panel");
            print_view(&store, &view, &theme);
        }
        Command::Collapse { view, panel } => {
            report(store.toggle_panel_collapsed(&view, &panel), "unknown view or panel");
            print_view(&store, &view, &theme);
        }
        Command::Move { view, from, to } => {
            report(
                store.reorder_panels(&view, from, to),
                "position outside the visible panels or nothing moved",
            );
            print_view(&store, &view, &theme);
        }
        Command::Style { view, panel, style } => {
            let partial = style.into_style().map_err(anyhow::Error::msg)?;
            report(
                store.update_panel_style(&view, &panel, &partial),
                "unknown view or panel, or style already set",
            );
            print_view(&store, &view, &theme);
        }
        Command::ResetStyle { view, panel } => {
            report(store.reset_panel_style(&view, &panel), "panel has no style");
            print_view(&store, &view, &theme);
        }
        Command::CopyStyle {
            from_view,
            from_panel,
            to_view,
            to_panel,
        } => {
            report(
                store.copy_panel_style(&from_view, &from_panel, &to_view, &to_panel),
                "source has no style, target is unknown or already matches",
            );
            print_view(&store, &to_view, &theme);
        }
        Command::Preset {
            view,
            preset,
            panel,
        } => {
            let Some(preset) = find_preset(&preset) else {
                bail!("Unknown preset: {}", preset);
            };
            let changed = match panel {
                Some(panel) => store.apply_preset(&view, &panel, &preset),
                None => store.apply_preset_to_all(&view, &preset),
            };
            report(changed, "unknown view or panel, or style already set");
            print_view(&store, &view, &theme);
        }
        Command::Presets => {
            for preset in builtin_presets() {
                println!(
                    "{:<12} {:<12} bg={}",
                    preset.id,
                    preset.name,
                    preset.style.bg_color.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Reset { view, all } => match (view, all) {
            (_, true) => {
                store.reset_all_layouts();
                println!("All layouts reset");
            }
            (Some(view), false) => {
                if !store.reset_layout(&view) {
                    bail!("Unknown view: {}", view);
                }
                print_view(&store, &view, &theme);
            }
            (None, false) => bail!("Specify a view or --all"),
        },
    }

    Ok(())
}

fn main() -> Result<()> {
    panel_layout::tracing::init();
    run(CliArgs::parse())
}
