fn main() {
    // ESP-IDF build-environment plumbing — only meaningful for device builds.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
