use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use lotto_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::Auth0TokenVerifier,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Auth0 验签器: 启动时先拉一次 JWKS, 失败不阻塞启动 (后台任务会重试)
    let verifier = Auth0TokenVerifier::new(config.auth0.clone());
    match verifier.refresh_keys().await {
        Ok(count) => log::info!("Loaded {count} JWKS signing keys"),
        Err(e) => log::error!("Initial JWKS fetch failed: {e:?}"),
    }

    // 后台定时刷新 JWKS, 租户轮换签名密钥时无需重启
    {
        let verifier_clone = verifier.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                if let Err(e) = verifier_clone.refresh_keys().await {
                    log::error!("Failed to refresh JWKS: {e:?}");
                }
            }
        });
    }

    // 创建服务
    let round_service = RoundService::new(pool.clone());
    let ticket_service = TicketService::new(pool.clone());
    let draw_service = DrawService::new(pool.clone());
    let user_service = UserService::new(pool.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(verifier.clone()))
            .app_data(web::Data::new(round_service.clone()))
            .app_data(web::Data::new(ticket_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::round_config)
                    .configure(handlers::ticket_config)
                    .configure(handlers::result_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
