pub mod auth;
pub mod dashboard;
pub mod navios;
pub mod notificacoes;
pub mod operacoes;
pub mod rateios;
pub mod relatorios;
pub mod vistorias;
