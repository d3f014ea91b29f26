/// Produces the narrative analysis for a submission from the case-study
/// context plus the team's prompt.
pub trait ResponseGenerator {
    /// Returns the complete narrative. A failed upstream call yields a
    /// descriptive error string rather than an error value, so the caller
    /// can show it in place of the analysis.
    fn generate_response(&self, prompt: &str, context_label: &str) -> String;

    /// Streaming variant: partial chunks are pushed to `sink` as they
    /// arrive so the caller can render incrementally, and the final
    /// assembled string is returned. The default delivers the whole
    /// response as a single chunk.
    fn generate_streaming(
        &self,
        prompt: &str,
        context_label: &str,
        sink: &mut dyn FnMut(&str),
    ) -> String {
        let response = self.generate_response(prompt, context_label);
        sink(&response);
        response
    }
}
