use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;
use infracheck::{checklist_file, cli, config, error, export, file_store, form};
use infracheck_common::export::format_date_time;
use infracheck_common::{
    generate_conclusion, validate_for_report, ChecklistRecord, ChecklistRepository, ConclusionSummary, LocationIndex,
};
use cli::{Cli, Commands};
use config::Config;
use error::{InfraCheckError, Result};
use file_store::JsonFileStore;
use std::path::PathBuf;

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn open_repository(config: &Config) -> Result<ChecklistRepository<JsonFileStore>> {
    let path = config.resolved_store_path()?;
    log::debug!("store: {}", path.display());
    Ok(ChecklistRepository::new(JsonFileStore::open(path)))
}

/// 入力JSONまたは保存済み拠点名からチェックリストを取得
fn load_record(
    repo: &ChecklistRepository<JsonFileStore>,
    input: Option<PathBuf>,
    location: Option<String>,
) -> Result<ChecklistRecord> {
    if let Some(path) = input {
        return checklist_file::read_record(&path);
    }
    let name = location.unwrap_or_default();
    repo.load_by_location(&name)?
        .ok_or_else(|| InfraCheckError::FileNotFound(format!("checklist salvo para \"{}\"", name)))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::New { location, output } => {
            println!("📋 infracheck - nova visita\n");

            let mut repo = open_repository(&config)?;
            let mut index = LocationIndex::new(repo.custom_locations_or_default());

            let mut record = repo.start_visit(location.as_deref(), now());
            if record.technician_name.is_empty() {
                if let Some(name) = &config.technician_name {
                    record.technician_name = name.clone();
                }
            }

            let record = form::run_checklist_form(record, &index)?;

            if index.learn(&record.location_name) {
                if let Err(e) = repo.save_custom_locations(index.custom()) {
                    log::error!("Failed to save custom locations: {e}");
                }
            }
            if repo.remember(&record, now()) {
                println!("✔ Checklist salvo: {}", record.location_name);
            } else {
                println!("⚠ Não foi possível salvar localmente (dados mantidos apenas nesta sessão)");
            }

            if let Some(path) = output {
                checklist_file::write_record(&path, &record)?;
                println!("✔ JSON: {}", path.display());
            }
        }

        Commands::Report { input, location, format, output } => {
            println!("📄 infracheck - relatório\n");

            let mut repo = open_repository(&config)?;
            let record = load_record(&repo, input, location)?;

            let format = format.unwrap_or(config.default_format);
            let output_dir = output.unwrap_or_else(|| config.resolved_output_dir());

            validate_for_report(&record)?;
            let at = now();
            repo.remember(&record, at);
            let paths = export::export_report(&record, format, &output_dir, at)?;

            for path in paths {
                println!("✔ {}", path.display());
            }
            println!("\n✅ Relatório gerado");
        }

        Commands::Conclusion { input, location } => {
            let repo = open_repository(&config)?;
            let record = load_record(&repo, input, location)?;

            let summary = ConclusionSummary::from_record(&record);
            println!("Switches: {}", summary.switch_count);
            println!("Antenas:  {}", summary.antenna_count);
            println!("Firewall: {}", if record.has_firewall { record.firewall_brand.as_str() } else { "ausente" });
            if summary.issues.is_empty() {
                println!("Pendências: nenhuma");
            } else {
                println!("Pendências:");
                for issue in &summary.issues {
                    println!("  - {}", issue);
                }
            }
            println!("\n{}", generate_conclusion(&record));
        }

        Commands::History => {
            let repo = open_repository(&config)?;
            let visits = repo.recent_visits_or_default();
            if visits.is_empty() {
                println!("Nenhuma visita registrada");
            }
            for visit in visits {
                let local = visit.visited_at.with_timezone(&Local).fixed_offset();
                println!("{}  {}", format_date_time(&local), visit.location_name);
            }
        }

        Commands::Locations { query } => {
            let repo = open_repository(&config)?;
            let index = LocationIndex::new(repo.custom_locations_or_default());
            for name in index.suggest(&query) {
                println!("{}", name);
            }
        }

        Commands::Config { set_store, set_output_dir, set_technician, set_format, show } => {
            let mut config = config;
            let changed = set_store.is_some()
                || set_output_dir.is_some()
                || set_technician.is_some()
                || set_format.is_some();

            if let Some(path) = set_store {
                config.store_path = Some(path);
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
            }
            if let Some(name) = set_technician {
                config.technician_name = Some(name);
            }
            if let Some(format) = set_format {
                config.default_format = format;
            }
            if changed {
                config.save()?;
                println!("✔ Configuração salva");
            }

            if show || !changed {
                println!("Configuração:");
                println!("  Arquivo de dados: {}", config.resolved_store_path()?.display());
                println!("  Pasta de saída: {}", config.resolved_output_dir().display());
                println!(
                    "  Técnico: {}",
                    config.technician_name.as_deref().unwrap_or("(não definido)")
                );
                println!("  Formato padrão: {}", config.default_format);
            }
        }
    }

    Ok(())
}
