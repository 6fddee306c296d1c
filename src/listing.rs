use crate::{
    error::GrabError,
    keyspace,
    product::Product,
    remote::{RemoteArchive, RemoteObject},
    satellite::Satellite,
    window::TimeWindow,
};

/// Find every file of `prod` whose scan started inside `window`.
///
/// All hourly prefixes touched by the window are listed to exhaustion, then each file is kept or
/// dropped on the start time in its name. Files whose names can't be parsed are skipped with a
/// warning.
pub fn list_objects<RA: RemoteArchive>(
    remote: &RA,
    sat: Satellite,
    prod: Product,
    window: &TimeWindow,
) -> Result<Vec<RemoteObject>, GrabError> {
    let mut objects = vec![];

    for valid_hour in window.hours() {
        let prefix = keyspace::hour_prefix(prod, valid_hour);
        list_prefix(remote, sat, &prefix, window, &mut objects).map_err(|err| {
            GrabError::Listing {
                product: prod,
                source: Box::new(err),
            }
        })?;
    }

    log::info!("Found {} files for {} in {}", objects.len(), prod, window);

    Ok(objects)
}

fn list_prefix<RA: RemoteArchive>(
    remote: &RA,
    sat: Satellite,
    prefix: &str,
    window: &TimeWindow,
    objects: &mut Vec<RemoteObject>,
) -> Result<(), GrabError> {
    let mut continuation = None;
    let mut num_pages = 0;

    loop {
        let page = remote.list_page(sat, prefix, continuation)?;
        num_pages += 1;

        for listed in page.objects {
            if listed.key.ends_with('/') {
                continue;
            }

            let obj = match RemoteObject::from_listing(listed) {
                Ok(obj) => obj,
                Err(err) => {
                    log::warn!("Skipping file in {}: {}", prefix, err);
                    continue;
                }
            };

            if window.contains(obj.start_time()) {
                objects.push(obj);
            }
        }

        continuation = page.continuation;
        if continuation.is_none() {
            break;
        }
    }

    log::debug!("Listed {} in {} page(s)", prefix, num_pages);

    Ok(())
}
