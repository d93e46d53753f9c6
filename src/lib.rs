#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod RxnData;
#[allow(non_snake_case)]
pub mod Utils;
pub mod library_manager;
