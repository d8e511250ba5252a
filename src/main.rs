use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use dash_smap::analyzer::{analisar, DiretorioColaboradores};
use dash_smap::config::AnaliseConfig;
use dash_smap::error::AppError;
use dash_smap::export::generate_indicators_report;
use dash_smap::parser::{parse_colaboradores, parse_tickets};
use dash_smap::Analise;

/// Indicadores mensais SMAP: entrada, backlog, SLA, indevidos e reincidência.
#[derive(Parser, Debug)]
#[command(name = "dash_smap", version)]
struct Cli {
    /// Arquivo CSV do log de chamados (export SMAP)
    tickets: PathBuf,

    /// Arquivo CSV da base de colaboradores (COLABORADOR;GERENTE)
    colaboradores: PathBuf,

    /// Restringe a análise a um gerente (repetível)
    #[arg(short, long = "gerente", value_name = "NOME")]
    gerentes: Vec<String>,

    /// Arquivo JSON de configuração (prazo de SLA, marcador de indevido)
    #[arg(long, value_name = "ARQUIVO")]
    config: Option<PathBuf>,

    /// Emite a análise completa em JSON no stdout
    #[arg(long)]
    json: bool,

    /// Grava o relatório Excel no caminho indicado
    #[arg(long, value_name = "ARQUIVO.xlsx")]
    export: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Erro ao carregar ou combinar os arquivos: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => AnaliseConfig::from_file(path)?,
        None => AnaliseConfig::default(),
    };

    let out = parse_tickets(&cli.tickets.to_string_lossy())?;
    info!(
        retidos = out.tickets.len(),
        descartados = out.skipped_rows,
        duracao_ms = out.parse_duration_ms,
        "chamados carregados"
    );
    for w in &out.warnings {
        warn!(linha = w.line, "{}", w.message);
    }

    let pairs = parse_colaboradores(&cli.colaboradores.to_string_lossy())?;
    let diretorio = DiretorioColaboradores::from_pairs(pairs);
    info!(colaboradores = diretorio.len(), "base de colaboradores carregada");

    let analise = analisar(out.tickets, &diretorio, &cli.gerentes, &config);

    if let Some(path) = &cli.export {
        let bytes = generate_indicators_report(&analise)?;
        std::fs::write(path, bytes)?;
        info!(arquivo = %path.display(), "relatório Excel gravado");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analise)?);
    } else {
        print_painel(&analise);
    }

    Ok(())
}

fn print_painel(analise: &Analise) {
    let resumo = &analise.painel.resumo;
    let mes = resumo
        .mes_vigente
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("Mês vigente: {mes}");
    println!(
        "SLA: {:.1}%  |  Backlog total: {}  |  Share indevidos: {:.1}%",
        resumo.sla_pct, resumo.backlog_total, resumo.share_indevidos_pct
    );
    println!();
    println!(
        "{:<8} {:>8} {:>11} {:>10} {:>10} {:>8} {:>8} {:>13} {:>10} {:>13}",
        "Mês",
        "Entrada",
        "Entrada/DU",
        "Indevidos",
        "Share(%)",
        "SLA(%)",
        "Backlog",
        "Reincid.(%)",
        "TMR(d)",
        "Mediana(d)"
    );
    for (mes, row) in &analise.painel.indicadores {
        println!(
            "{:<8} {:>8} {:>11.1} {:>10} {:>10.1} {:>8.1} {:>8} {:>13.1} {:>10.1} {:>13.1}",
            mes.to_string(),
            row.entrada,
            row.entrada_por_du,
            row.total_indevidos,
            row.share_indevidos_pct,
            row.sla_pct,
            row.backlog,
            row.reincidencia_pct,
            row.tmr_dias,
            row.mediana_dias
        );
    }
}
