//! Zojnik 客户端命令行入口
//! 手动冒烟：登录、刷新令牌、校验令牌、查看个人资料

use zojnik_client::{telemetry, ApiClient, ClientConfig, CredentialKeys};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    let command = match args.get(1).map(String::as_str) {
        Some("--version") => {
            println!("zojnik-client {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--help") | None => {
            print_help();
            return Ok(());
        }
        Some(cmd @ ("login" | "refresh" | "verify" | "me")) => cmd.to_string(),
        Some(other) => {
            eprintln!("未知参数: {}", other);
            print_help();
            std::process::exit(1);
        }
    };

    // 1. 加载配置
    let config = ClientConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        credentials = %config.credentials.resolve().display(),
        "zojnik-client starting"
    );

    // 3. 加载凭据并执行命令
    let mut client = ApiClient::from_config(&config)?;

    let status = match command.as_str() {
        "login" => match (args.get(2), args.get(3)) {
            (Some(username), Some(password)) => {
                client.login_and_store(username, password).await?.status
            }
            _ => client.login_with_stored_credentials().await?.status,
        },
        "refresh" => client.refresh_and_store().await?.status,
        "verify" => {
            let token = client.store().get(CredentialKeys::VALID_ACCESS_TOKEN)?;
            client.verify_token(&token).await?
        }
        _ => client.me().await?.status,
    };

    println!("{} -> {}", command, status);

    if !(200..300).contains(&status) {
        std::process::exit(1);
    }
    Ok(())
}

/// 打印帮助信息
fn print_help() {
    println!("zojnik-client {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: zojnik-client <命令> [参数]");
    println!();
    println!("命令:");
    println!("  login [用户名 密码]  获取令牌对并写入凭据文件（默认使用 valid_email/valid_password）");
    println!("  refresh              用 valid_refresh_token 刷新 valid_access_token");
    println!("  verify               校验 valid_access_token");
    println!("  me                   查看当前用户资料");
    println!();
    println!("选项:");
    println!("  --version            打印版本信息并退出");
    println!("  --help               打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  ZOJNIK_API__BASE_URL          API 地址");
    println!("  ZOJNIK_CREDENTIALS__PATH      凭据文件路径（默认 .env）");
    println!("  ZOJNIK_LOGGING__LEVEL         日志级别");
    println!("  ZOJNIK_LOGGING__FORMAT        日志格式: json, pretty, compact");
    println!("  ZOJNIK_OUTPUT__DUMP_RESPONSES 是否输出响应内容");
}
