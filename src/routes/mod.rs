/// Router Module Index
///
/// Organizes routing into one module per resource. Access control does not
/// live here: every handler evaluates its declared access requirement list
/// through the authorization gate, so these modules stay pure glue and the
/// policy for a route is visible next to the handler it protects.

/// GET / — anonymous home payload.
pub mod home;

/// The /Veiculos routes (list, show, create, update, delete).
pub mod vehicles;

/// The /administradores routes (login, show, list, create).
pub mod administrators;
