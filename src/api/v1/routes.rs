/*
 * Responsibility
 * - URL structure of v1
 * - Which guard chain protects which routes (one access layer per group)
 */
use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::api::v1::handlers::{
    admin::deactivate_user, communities::list_routes, health::health, issues::list_issues,
    me::me, pickups::update_pickup,
};
use crate::middleware::auth::access;
use crate::services::auth::identity::Role;
use crate::services::auth::{Guard, GuardChain};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let session = access::apply(
        Router::new().route("/me", get(me)),
        state.clone(),
        GuardChain::authenticated(),
    );

    let issues = access::apply(
        Router::new().route("/issues", get(list_issues)),
        state.clone(),
        GuardChain::optional(),
    );

    let communities = access::apply(
        Router::new().route("/communities/{communityId}/routes", get(list_routes)),
        state.clone(),
        GuardChain::new([
            Guard::multi_role([Role::Admin, Role::CommunityAdmin]),
            Guard::community(),
        ]),
    );

    let pickups = access::apply(
        Router::new().route("/pickups/{pickupId}", put(update_pickup)),
        state.clone(),
        GuardChain::new([Guard::ownership("user")]),
    );

    let admin = access::apply(
        Router::new().route("/admin/users/{userId}", delete(deactivate_user)),
        state,
        GuardChain::new([Guard::role([Role::Admin])]),
    );

    public
        .merge(session)
        .merge(issues)
        .merge(communities)
        .merge(pickups)
        .merge(admin)
}
