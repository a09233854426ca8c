use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use time::OffsetDateTime;

use handover_report::assets::FsAssetResolver;
use handover_report::canvas::PdfCanvas;
use handover_report::mail::{self, MailConfig};
use handover_report::store::OrderStore;
use handover_report::{OrderAggregate, ReportComposer};

#[derive(Parser, Debug)]
#[command(name = "handover-report", about = "Render and send vehicle handover reports")]
struct Cli {
    /// SQLite database holding the order snapshots.
    #[arg(long, default_value = "orders.db")]
    db: PathBuf,

    /// Base directory for photos, signatures and the company logo.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one order to a PDF file.
    Render {
        /// Order id in the database, or a JSON snapshot file with --from-file.
        order: String,

        #[arg(long)]
        from_file: bool,

        /// TTF font embedded into the PDF.
        #[arg(long)]
        font: PathBuf,

        /// Output path; defaults to the attachment filename in the
        /// current directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render one order and send it by email.
    Email {
        order: String,

        #[arg(long)]
        font: PathBuf,

        /// JSON file with the SMTP configuration.
        #[arg(long)]
        smtp_config: PathBuf,

        #[arg(long)]
        to: String,
    },

    /// Import order snapshots from a JSON file (one order or an array).
    Seed {
        file: PathBuf,
    },

    /// List stored orders.
    List,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { order, from_file, font, out } => {
            let order = if from_file {
                read_order_file(&PathBuf::from(&order))?
            } else {
                OrderStore::open(&cli.db)?.load_order(&order)?
            };

            let now = OffsetDateTime::now_utc();
            let resolver = FsAssetResolver::new(&cli.assets);
            let composer = ReportComposer::new(&resolver, now);
            let canvas = PdfCanvas::from_font_file(&order.order_number, &font)?;
            let bytes = composer.render(&order, canvas)?;

            let out = out.unwrap_or_else(|| PathBuf::from(mail::report_filename(&order.id, now)));
            fs::write(&out, &bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} ({} bytes)", out.display(), bytes.len());
        }

        Command::Email { order, font, smtp_config, to } => {
            let order = OrderStore::open(&cli.db)?.load_order(&order)?;
            let cfg: MailConfig = serde_json::from_str(
                &fs::read_to_string(&smtp_config)
                    .with_context(|| format!("failed to read {}", smtp_config.display()))?,
            )
            .context("invalid SMTP configuration")?;

            let now = OffsetDateTime::now_utc();
            let resolver = FsAssetResolver::new(&cli.assets);
            let composer = ReportComposer::new(&resolver, now);
            let canvas = PdfCanvas::from_font_file(&order.order_number, &font)?;
            let bytes = composer.render(&order, canvas)?;

            mail::send_report_email(&cfg, &order, bytes, &to, now)?;
            println!("sent report for {} to {}", order.order_number, to);
        }

        Command::Seed { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut orders: Vec<OrderAggregate> = match serde_json::from_str(&raw) {
                Ok(orders) => orders,
                Err(_) => vec![serde_json::from_str(&raw).context("invalid order JSON")?],
            };

            let store = OrderStore::open(&cli.db)?;
            for order in &mut orders {
                if order.id.trim().is_empty() {
                    order.id = uuid::Uuid::new_v4().to_string();
                }
                store.save_order(order)?;
            }
            println!("imported {} order(s)", orders.len());
        }

        Command::List => {
            let store = OrderStore::open(&cli.db)?;
            for (id, number, status) in store.list_orders()? {
                println!("{id}  {number}  {status}");
            }
        }
    }

    Ok(())
}

fn read_order_file(path: &PathBuf) -> anyhow::Result<OrderAggregate> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid order JSON")
}
