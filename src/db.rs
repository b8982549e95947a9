pub mod user_repo;
pub use user_repo::UserRepository;
pub mod rateios_repo;
pub use rateios_repo::RateiosRepository;
pub mod operacoes_repo;
pub use operacoes_repo::OperacoesRepository;
pub mod navios_repo;
pub use navios_repo::NaviosRepository;
pub mod vistorias_repo;
pub use vistorias_repo::VistoriasRepository;
pub mod notificacoes_repo;
pub use notificacoes_repo::NotificacoesRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
