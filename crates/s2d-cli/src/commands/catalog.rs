use s2d_core::{COMMON_SYMPTOMS, DISEASE_LABELS};

pub fn labels() {
    for (index, label) in DISEASE_LABELS.iter().enumerate() {
        println!("{index:>2}  {label}");
    }
}

pub fn symptoms() {
    for (index, symptom) in COMMON_SYMPTOMS.iter().enumerate() {
        println!("{:>2}. {symptom}", index + 1);
    }
}
