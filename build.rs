fn main() {
    // Board overrides are read with option_env! in config.rs.
    println!("cargo:rerun-if-env-changed=CLIMA_CONFIG_JSON");

    // Only the on-target build links against ESP-IDF; host builds and tests
    // need no sysenv propagation.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
