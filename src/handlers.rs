// handlers.rs
// Plugin protocol handlers: one route per volume lifecycle operation

use crate::driver::{DatasetEngine, ZfsDriver};
use crate::models::{
    ActivateResponse, CapabilitiesResponse, CreateRequest, ErrorResponse, GetResponse,
    ListResponse, MountRequest, MountpointResponse, Volume, VolumeRequest,
};
use tracing::debug;
use warp::{Filter, Rejection, Reply};

/// All plugin routes. Every endpoint is a POST with a JSON body (possibly
/// empty) and always answers 200; failures travel in the `Err` field.
pub fn routes<E: DatasetEngine + 'static>(
    driver: ZfsDriver<E>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let driver = warp::any().map(move || driver.clone());

    let activate = warp::post()
        .and(warp::path("Plugin.Activate"))
        .and(warp::path::end())
        .and_then(activate_handler);

    let create = warp::post()
        .and(warp::path("VolumeDriver.Create"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(create_handler);

    let list = warp::post()
        .and(warp::path("VolumeDriver.List"))
        .and(warp::path::end())
        .and(driver.clone())
        .and_then(list_handler);

    let get = warp::post()
        .and(warp::path("VolumeDriver.Get"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(get_handler);

    let remove = warp::post()
        .and(warp::path("VolumeDriver.Remove"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(remove_handler);

    let path = warp::post()
        .and(warp::path("VolumeDriver.Path"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(path_handler);

    let mount = warp::post()
        .and(warp::path("VolumeDriver.Mount"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(mount_handler);

    let unmount = warp::post()
        .and(warp::path("VolumeDriver.Unmount"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(driver.clone())
        .and_then(unmount_handler);

    let capabilities = warp::post()
        .and(warp::path("VolumeDriver.Capabilities"))
        .and(warp::path::end())
        .and_then(capabilities_handler);

    activate
        .or(create)
        .or(list)
        .or(get)
        .or(remove)
        .or(path)
        .or(mount)
        .or(unmount)
        .or(capabilities)
}

async fn activate_handler() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&ActivateResponse::volume_driver()))
}

async fn create_handler<E: DatasetEngine>(
    body: CreateRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    match driver.create(&body.name, body.opts.unwrap_or_default()).await {
        Ok(()) => Ok(warp::reply::json(&ErrorResponse::ok())),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn list_handler<E: DatasetEngine>(driver: ZfsDriver<E>) -> Result<impl Reply, Rejection> {
    match driver.list().await {
        Ok(volumes) => Ok(warp::reply::json(&ListResponse {
            volumes: volumes.into_iter().map(Volume::from).collect(),
        })),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn get_handler<E: DatasetEngine>(
    body: VolumeRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    match driver.get(&body.name).await {
        Ok(info) => Ok(warp::reply::json(&GetResponse {
            volume: Volume::from(info),
        })),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn remove_handler<E: DatasetEngine>(
    body: VolumeRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    match driver.remove(&body.name).await {
        Ok(()) => Ok(warp::reply::json(&ErrorResponse::ok())),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn path_handler<E: DatasetEngine>(
    body: VolumeRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    match driver.mountpoint(&body.name).await {
        Ok(mountpoint) => Ok(warp::reply::json(&MountpointResponse { mountpoint })),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn mount_handler<E: DatasetEngine>(
    body: MountRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    debug!(name = %body.name, id = %body.id, "mount request");
    match driver.mountpoint(&body.name).await {
        Ok(mountpoint) => Ok(warp::reply::json(&MountpointResponse { mountpoint })),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn unmount_handler<E: DatasetEngine>(
    body: MountRequest,
    driver: ZfsDriver<E>,
) -> Result<impl Reply, Rejection> {
    debug!(name = %body.name, id = %body.id, "unmount request");
    match driver.unmount(&body.name).await {
        Ok(()) => Ok(warp::reply::json(&ErrorResponse::ok())),
        Err(e) => Ok(warp::reply::json(&ErrorResponse::from(&e))),
    }
}

async fn capabilities_handler() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&CapabilitiesResponse::local()))
}
