// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_resumo,

        // --- Operações ---
        handlers::operacoes::criar_operacao,
        handlers::operacoes::listar_operacoes,
        handlers::operacoes::detalhar_operacao,
        handlers::operacoes::excluir_operacao,

        // --- Navios ---
        handlers::navios::criar_navio,
        handlers::navios::listar_navios,
        handlers::navios::criar_viagem,
        handlers::navios::listar_viagens,

        // --- Relatórios ---
        handlers::relatorios::horas_equipamentos,

        // --- Rateios ---
        handlers::fornecedores::criar_fornecedor,
        handlers::fornecedores::listar_fornecedores,
        handlers::fornecedores::excluir_fornecedor,
        handlers::rateios::criar_boletim,
        handlers::rateios::listar_boletins,
        handlers::rateios::detalhar_boletim,
        handlers::rateios::editar_total,
        handlers::rateios::excluir_boletim,
        handlers::rateios::adicionar_rateio,
        handlers::rateios::excluir_rateio,
        handlers::rateios::exportar_pdf,

        // --- Vistorias ---
        handlers::vistorias::criar_vistoria,
        handlers::vistorias::listar_vistorias,

        // --- Notificações ---
        handlers::notificacoes::listar_notificacoes,
        handlers::notificacoes::marcar_lida,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Dashboard ---
            models::dashboard::ResumoDashboard,

            // --- Operações ---
            models::operacoes::Turno,
            models::operacoes::Operacao,
            models::operacoes::EquipamentoLancado,
            models::operacoes::Ajudante,
            models::operacoes::Falta,
            models::operacoes::OperacaoDetalhe,
            handlers::operacoes::CreateOperacaoPayload,
            handlers::operacoes::EquipamentoPayload,
            handlers::operacoes::AjudantePayload,
            handlers::operacoes::FaltaPayload,

            // --- Navios ---
            models::navios::Navio,
            models::navios::Viagem,
            handlers::navios::CreateNavioPayload,
            handlers::navios::CreateViagemPayload,

            // --- Relatórios ---
            models::relatorios::ChaveAgrupamento,
            models::relatorios::RegistroHoras,
            models::relatorios::GrupoHoras,

            // --- Rateios ---
            models::rateios::CentroCusto,
            models::rateios::PeriodoReferencia,
            models::rateios::StatusBoletim,
            models::rateios::Fornecedor,
            models::rateios::BoletimMedicao,
            models::rateios::Rateio,
            models::rateios::BoletimDetalhe,
            handlers::fornecedores::CreateFornecedorPayload,
            handlers::rateios::CreateBoletimPayload,
            handlers::rateios::EditarTotalPayload,
            handlers::rateios::AddRateioPayload,

            // --- Vistorias ---
            models::vistorias::StatusVistoria,
            models::vistorias::Vistoria,
            handlers::vistorias::CreateVistoriaPayload,

            // --- Notificações ---
            models::notificacoes::Notificacao,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Dashboard", description = "Indicadores do Dia"),
        (name = "Operacoes", description = "Apontamento de Operações por Turno"),
        (name = "Navios", description = "Navios e Viagens"),
        (name = "Relatorios", description = "Relatórios de Horas de Equipamento"),
        (name = "Rateios", description = "BMs e Rateio por Centro de Custo"),
        (name = "Vistorias", description = "Vistorias de Equipamentos"),
        (name = "Notificacoes", description = "Central de Notificações")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
