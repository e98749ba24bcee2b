use std::future::Future;

use super::AnalysisError;

pub trait Step: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn run(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Output, AnalysisError>> + Send;
}

/// Runs two steps concurrently on clones of the same input. Fails fast: the first
/// error drops the other branch and no partial output escapes.
pub struct ParallelStep<A, B> {
    a: A,
    b: B,
}

#[must_use]
pub fn parallel<A, B>(a: A, b: B) -> ParallelStep<A, B> {
    ParallelStep { a, b }
}

impl<A, B> Step for ParallelStep<A, B>
where
    A: Step,
    B: Step<Input = A::Input>,
    A::Input: Clone,
{
    type Input = A::Input;
    type Output = (A::Output, B::Output);

    async fn run(&self, input: Self::Input) -> Result<Self::Output, AnalysisError> {
        let input_b = input.clone();
        tokio::try_join!(self.a.run(input), self.b.run(input_b))
    }
}
