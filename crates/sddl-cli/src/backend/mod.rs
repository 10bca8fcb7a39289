//! Back-end registry (spec.md §9 "minimal plug-in mechanism"): a static
//! mapping from target name to a [`sddl::Target`] constructor. Neither
//! reference back-end here is part of the core's contract; they exist only
//! to give the CLI something runnable to drive end-to-end.

mod debug;
mod json;

pub fn names() -> &'static [&'static str] {
    &["debug", "json"]
}

pub fn make(name: &str, namespace: &str) -> Option<Box<dyn sddl::Target>> {
    match name {
        "debug" => Some(Box::new(debug::DebugTarget::new(namespace))),
        "json" => Some(Box::new(json::JsonTarget::new(namespace))),
        _ => None,
    }
}
