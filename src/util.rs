/// Copies a borrowed path into owned segments.
pub(crate) fn to_owned_path<S: AsRef<str>>(path: &[S]) -> Vec<String> {
    path.iter().map(|segment| segment.as_ref().to_owned()).collect()
}
