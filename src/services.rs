pub mod auth;
pub mod dashboard_service;
pub mod documento_service;
pub mod navio_service;
pub mod notificacao_service;
pub mod operacao_service;
pub mod rateio_service;
pub mod relatorio_service;
pub mod vistoria_service;
