//! Owner middleware.

use salvo::prelude::*;
use storefront_app::ids::OwnerId;

use crate::extensions::*;

pub(crate) const OWNER_HEADER: &str = "x-owner-id";

/// Trust the gateway-provided owner id; reject requests without a usable one.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(owner) = extract_owner(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid x-owner-id header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_owner(owner);

    ctrl.call_next(req, depot, res).await;
}

fn extract_owner(req: &Request) -> Option<OwnerId> {
    let value = req.headers().get(OWNER_HEADER)?.to_str().ok()?;

    value
        .parse::<OwnerId>()
        .ok()
        .filter(|owner| owner.into_inner() > 0)
}
