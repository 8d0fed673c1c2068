/// The platform side of media queries.
///
/// Implementors watch the given queries and report every match state change back through
/// [`MediaMarshaller::dispatch`](crate::MediaMarshaller::dispatch), including the synthetic
/// `print` query when it is part of the list.
pub trait MatchMedia {
    fn observe(&mut self, queries: &[String]);
}
