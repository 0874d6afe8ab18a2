use chrono::Local;

/// `{base}_{timestamp}.{ext}` with `/` in `base` flattened, so namespaced
/// webcam names stay a single path component.
pub fn generate_timestamped_filename(
    base_name: &str,
    timestamp_format: &str,
    extension: &str,
) -> String {
    let timestamp = Local::now().format(timestamp_format);
    format!("{}_{}.{}", base_name.replace('/', "_"), timestamp, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_names_become_flat_filenames() {
        let name = generate_timestamped_filename("go2rtc/printer", "%Y", "jpg");
        assert!(name.starts_with("go2rtc_printer_"));
        assert!(name.ends_with(".jpg"));
        assert!(!name.contains('/'));
    }
}
