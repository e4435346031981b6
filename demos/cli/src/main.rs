use std::path::PathBuf;

use anyhow::Context;
use careboard_client::ApiClient;
use careboard_core::{Credentials, DashboardConfig, DashboardSnapshot, PatientRecord};
use careboard_records::{build_dashboard, parse_patients};
use careboard_ui::{render_dashboard, ChartSpec, FieldSlot, Surface, VitalLine};
use clap::Parser;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "careboard-cli",
    about = "Tải hồ sơ bệnh nhân và dựng dashboard ngay trên terminal."
)]
struct Args {
    /// Đường dẫn file JSON thay cho gọi API (demo offline).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Endpoint trả về danh sách bệnh nhân.
    #[arg(long)]
    url: Option<String>,

    /// Tên bệnh nhân cần hiển thị.
    #[arg(short, long)]
    patient: Option<String>,

    /// Tài khoản basic auth; mặc định đọc CAREBOARD_API_USER.
    #[arg(long)]
    username: Option<String>,

    /// Mật khẩu basic auth; mặc định đọc CAREBOARD_API_PASS.
    #[arg(long)]
    password: Option<String>,

    /// In snapshot dạng JSON thay vì dashboard.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = DashboardConfig::default();
    if let Some(url) = &args.url {
        config.api_url = url.clone();
    }
    if let Some(patient) = &args.patient {
        config.target_patient = patient.clone();
    }

    match run(&args, &config).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!(error = %err, "không dựng được dashboard");
            anyhow::bail!("Failed to load patient data. See log for details.");
        }
    }
}

async fn run(args: &Args, config: &DashboardConfig) -> anyhow::Result<()> {
    let records = load_records(args, config).await?;
    let snapshot = build_dashboard(&records, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_header(&snapshot);
    let mut surface = TermSurface;
    render_dashboard(&mut surface, &snapshot, config);
    Ok(())
}

async fn load_records(
    args: &Args,
    config: &DashboardConfig,
) -> anyhow::Result<Vec<PatientRecord>> {
    match &args.input {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            Ok(parse_patients(&body)?)
        }
        None => {
            let credentials = resolve_credentials(args).context(
                "Thiếu thông tin đăng nhập API (--username/--password hoặc \
                 CAREBOARD_API_USER/CAREBOARD_API_PASS)",
            )?;
            let client = ApiClient::new(&config.api_url, &credentials);
            Ok(client.fetch_patients().await?)
        }
    }
}

fn resolve_credentials(args: &Args) -> Option<Credentials> {
    match (&args.username, &args.password) {
        (Some(username), Some(password)) => Some(Credentials {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => Credentials::from_env(),
    }
}

fn print_header(snapshot: &DashboardSnapshot) {
    println!("== Patient dashboard ({}) ==", snapshot.generated_at);
}

/// Surface terminal: in từng vùng dashboard ra stdout.
struct TermSurface;

impl Surface for TermSurface {
    fn write_field(&mut self, slot: FieldSlot, value: &str) {
        println!("{:<18} {value}", field_label(slot));
    }

    fn show_avatar(&mut self, url: &str) {
        println!("{:<18} {url}", "Avatar");
    }

    fn replace_vitals(&mut self, lines: &[VitalLine]) {
        println!("\n-- Latest vitals --");
        if lines.is_empty() {
            println!("No vitals available.");
            return;
        }
        for line in lines {
            println!("{:<18} {}", line.label, line.value);
        }
    }

    fn replace_diagnoses(&mut self, lines: &[String]) {
        println!("\n-- Diagnosis history --");
        if lines.is_empty() {
            println!("No diagnosis history found.");
            return;
        }
        for line in lines {
            println!("{line}");
        }
    }

    fn render_chart(&mut self, chart: &ChartSpec) {
        println!("\n-- Blood pressure by year --");
        print!("{:<6}", "Year");
        for series in &chart.datasets {
            print!(" {:>9}", series.label);
        }
        println!();
        for (idx, year) in chart.labels.iter().enumerate() {
            print!("{year:<6}");
            for series in &chart.datasets {
                print!(" {:>9}", series.data[idx]);
            }
            println!();
        }
    }
}

fn field_label(slot: FieldSlot) -> &'static str {
    match slot {
        FieldSlot::Name => "Name",
        FieldSlot::Gender => "Gender",
        FieldSlot::Age => "Age",
        FieldSlot::DateOfBirth => "Date of birth",
        FieldSlot::Phone => "Phone",
        FieldSlot::EmergencyContact => "Emergency contact",
        FieldSlot::InsuranceType => "Insurance",
        FieldSlot::BloodType => "Blood type",
    }
}
