use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Everything that can stop a chart request from producing a page.
///
/// Messages are client-facing and serialised as `{"erro": "<message>"}`.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Não foi possível ler o corpo da requisição.")]
    Body { status: StatusCode },

    #[error("O corpo da requisição não é um JSON válido.")]
    MalformedJson(#[source] serde_json::Error),

    #[error("O corpo da requisição deve ser um objeto JSON.")]
    NotAnObject,

    #[error("Os dados enviados devem conter a chave 'valores'.")]
    MissingValues,

    #[error("A chave 'valores' deve conter uma lista de números.")]
    ValuesNotArray,

    #[error("O item {index} de 'valores' não é um número.")]
    NonNumericValue { index: usize },

    #[error("A chave 'valores' aceita no máximo {max} itens.")]
    TooManyValues { max: usize },

    #[error("O intervalo de 'valores' é grande demais para ser desenhado.")]
    RangeTooWide,

    #[error("Falha ao gerar o gráfico.")]
    Render(#[source] anyhow::Error),
}

impl ChartError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChartError::Body { status } => *status,
            ChartError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label used for the rejection metric.
    pub fn reason(&self) -> &'static str {
        match self {
            ChartError::Body { .. } => "body",
            ChartError::MalformedJson(_) => "malformed_json",
            ChartError::NotAnObject => "not_an_object",
            ChartError::MissingValues => "missing_values",
            ChartError::ValuesNotArray => "values_not_array",
            ChartError::NonNumericValue { .. } => "non_numeric_value",
            ChartError::TooManyValues { .. } => "too_many_values",
            ChartError::RangeTooWide => "range_too_wide",
            ChartError::Render(_) => "render",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    erro: String,
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ChartError::Render(err) = &self {
            tracing::error!(error = ?err, "Chart rendering failed");
        }

        (
            status,
            Json(ErrorResponse {
                erro: self.to_string(),
            }),
        )
            .into_response()
    }
}
