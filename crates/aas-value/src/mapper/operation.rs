//! Operation mapper over the three positional variable groups.

use crate::error::MappingError;
use crate::mapper::sequence;
use crate::mapper::ValueMapper;
use crate::model::Operation;
use crate::value::OperationValue;

/// The three variable groups are independent positional sequences.
impl ValueMapper for Operation {
    type Value = OperationValue;

    fn value(&self) -> OperationValue {
        OperationValue {
            input_variables: sequence::value_only_sequence(&self.input_variables),
            output_variables: sequence::value_only_sequence(&self.output_variables),
            inoutput_variables: sequence::value_only_sequence(&self.inoutput_variables),
        }
    }

    fn check_value(&self, value: &OperationValue) -> Result<(), MappingError> {
        sequence::check_value_only_sequence(&self.input_variables, &value.input_variables)?;
        sequence::check_value_only_sequence(&self.output_variables, &value.output_variables)?;
        sequence::check_value_only_sequence(&self.inoutput_variables, &value.inoutput_variables)
    }

    fn apply_value(&mut self, value: OperationValue) {
        sequence::apply_value_only_sequence(&mut self.input_variables, value.input_variables);
        sequence::apply_value_only_sequence(&mut self.output_variables, value.output_variables);
        sequence::apply_value_only_sequence(
            &mut self.inoutput_variables,
            value.inoutput_variables,
        );
    }
}
