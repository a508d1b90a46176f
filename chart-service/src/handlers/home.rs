pub const WELCOME_MESSAGE: &str = "Bem-vindo à API de Gráficos!";

pub async fn home() -> &'static str {
    WELCOME_MESSAGE
}
