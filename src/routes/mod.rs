//! Protected-route gate.
//!
//! Every navigation target is resolved against the live session state.
//! Nothing is cached between navigations: a session torn down between two
//! clicks redirects the second one.

use crate::session::SessionStore;

/// The application's navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    ControlPanel,
    Dashboard,
    Stock,
    RegisterProduct,
    RegisterSale,
    RegisterStockEntry,
    StockEntries,
    Sales,
    Employees,
    Report,
}

impl Route {
    /// Everything except the sign-in view requires authentication.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::SignIn)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/login",
            Route::ControlPanel => "/",
            Route::Dashboard => "/dashboard",
            Route::Stock => "/estoque",
            Route::RegisterProduct => "/cadastro_estoque",
            Route::RegisterSale => "/vendas",
            Route::RegisterStockEntry => "/registro-entradas",
            Route::StockEntries => "/entradas",
            Route::Sales => "/saidas",
            Route::Employees => "/funcionarios",
            Route::Report => "/relatorio",
        }
    }
}

/// Decides whether a navigation target may render given the current session.
///
/// Unauthenticated traffic to a protected route lands on sign-in; an
/// authenticated user asking for sign-in is sent to the control panel
/// instead.
pub fn resolve(session: &SessionStore, requested: Route) -> Route {
    let authenticated = session.is_authenticated();
    match (authenticated, requested) {
        (false, route) if route.is_protected() => Route::SignIn,
        (true, Route::SignIn) => Route::ControlPanel,
        (_, route) => route,
    }
}
