/// Sink for bytes the terminal sends back to the remote host.
///
/// Device attribute requests, status reports and the answerback message
/// are answered inside the same byte stream that carried the request; the
/// emulator writes those responses here. A `Vec<u8>` works as a capturing
/// sink in tests.
pub trait Host {
    fn write_back(&mut self, bytes: &[u8]);
}

impl Host for Vec<u8> {
    fn write_back(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}
