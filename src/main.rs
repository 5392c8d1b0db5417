use anyhow::Result;
use clap::Parser;
use dia_client::config::Config;
use dia_client::logger;
use dia_client::models::{Language, Task};
use dia_client::orchestrator::{App, SessionJob};
use dia_client::services::Osc52Clipboard;
use std::path::PathBuf;

/// 文档智能分析客户端
#[derive(Debug, Parser)]
#[command(name = "dia-client", version, about = "Submit documents to the DIA analysis service")]
struct Cli {
    /// 分析任务: summarize / extract / compare / qa
    #[arg(long, default_value = "summarize")]
    task: Task,

    /// 输出语言: en / or / bilingual
    #[arg(long, default_value = "en")]
    language: Language,

    /// 文档路径（对比任务需要两个）
    #[arg(long = "doc", required = true)]
    documents: Vec<PathBuf>,

    /// 抽取和问答任务的查询内容
    #[arg(long)]
    query: Option<String>,

    /// 复制结果到终端剪贴板（OSC 52）
    #[arg(long)]
    copy: bool,

    /// 保存结果为 dia-results-<时间戳>.txt
    #[arg(long)]
    download: bool,

    /// TOML 配置文件
    #[arg(long, env = "DIA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    let job = SessionJob {
        task: cli.task,
        language: cli.language,
        documents: cli.documents,
        query: cli.query,
        copy: cli.copy,
        download: cli.download,
    };

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    let mut clipboard = Osc52Clipboard::stdout();
    let report = app.run(job, &mut clipboard).await?;

    println!("{}", report.rendered);
    if let Some(path) = report.saved_to {
        eprintln!("Results saved to {}", path.display());
    }

    Ok(())
}
