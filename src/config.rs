use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub mongo_db: String,
    /// HS256 signing secret for bearer tokens. Fixed for the process lifetime.
    pub jwt_secret: String,
    /// Root of the static asset tree; uploaded images live under `<asset_dir>/images`.
    pub asset_dir: String,
    pub login_email: String,
    pub login_senha: String,
    pub login_nome: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let jwt_secret =
        std::env::var("CHAMADOS_JWT_SECRET").unwrap_or_else(|_| "chave_secreta_aqui".into());

    if jwt_secret == "chave_secreta_aqui" {
        let env_mode = std::env::var("CHAMADOS_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "CHAMADOS_JWT_SECRET is still the insecure placeholder. \
                 Set a proper secret before running in production."
            );
        }
        eprintln!("⚠️  CHAMADOS_JWT_SECRET is not set — using insecure placeholder. Set a real secret for production.");
    }

    Ok(Config {
        port: std::env::var("CHAMADOS_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000),
        mongo_uri: std::env::var("MONGO_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".into()),
        mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "netcom".into()),
        jwt_secret,
        asset_dir: std::env::var("CHAMADOS_ASSET_DIR").unwrap_or_else(|_| "assets".into()),
        login_email: std::env::var("CHAMADOS_LOGIN_EMAIL")
            .unwrap_or_else(|_| "suporte@netcom.com".into()),
        login_senha: std::env::var("CHAMADOS_LOGIN_SENHA").unwrap_or_else(|_| "123".into()),
        login_nome: std::env::var("CHAMADOS_LOGIN_NOME")
            .unwrap_or_else(|_| "Suporte Netcom".into()),
    })
}
