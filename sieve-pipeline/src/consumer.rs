use sieve_core::models::SequenceCorpus;

///
/// Reader of a published corpus, such as a visualization front end. It is handed
/// the corpus exactly once, after the pipeline publishes, and never on failure.
///
pub trait CorpusConsumer {
    fn consume(&mut self, corpus: &SequenceCorpus);
}

impl<T> CorpusConsumer for T
where
    T: FnMut(&SequenceCorpus),
{
    fn consume(&mut self, corpus: &SequenceCorpus) {
        self(corpus)
    }
}
