//! Tests for the enrollment service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockall::Sequence;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockAddressRepository, MockEnrollmentRepository, MockPostalCodeLookup,
};
use crate::domain::{
    Address, AddressDetails, AddressId, Enrollment, EnrollmentDetails, EnrollmentId,
    EnrollmentRecord, ErrorCode, PostalAddress,
};

type TestService =
    EnrollmentService<MockEnrollmentRepository, MockAddressRepository, MockPostalCodeLookup>;

fn make_service(
    enrollments: MockEnrollmentRepository,
    addresses: MockAddressRepository,
    postal_codes: MockPostalCodeLookup,
) -> TestService {
    EnrollmentService::new(
        Arc::new(enrollments),
        Arc::new(addresses),
        Arc::new(postal_codes),
    )
}

fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

#[fixture]
fn user_id() -> UserId {
    UserId::new(11).expect("valid id")
}

#[fixture]
fn enrollment_details() -> EnrollmentDetails {
    EnrollmentDetails {
        name: "Joana Prado".to_owned(),
        cpf: "39053344705".to_owned(),
        birthday: instant(1994, 8, 21),
        phone: "(21) 98765-4321".to_owned(),
    }
}

#[fixture]
fn address_details() -> AddressDetails {
    AddressDetails {
        cep: "01001000".to_owned(),
        street: "Praça da Sé".to_owned(),
        city: "São Paulo".to_owned(),
        number: "100".to_owned(),
        state: "SP".to_owned(),
        neighborhood: "Sé".to_owned(),
        address_detail: Some("Apto 12".to_owned()),
    }
}

fn stored_enrollment(user_id: UserId, details: EnrollmentDetails) -> Enrollment {
    Enrollment {
        id: EnrollmentId::new(7),
        user_id,
        details,
        created_at: instant(2024, 1, 1),
        updated_at: instant(2024, 2, 1),
    }
}

fn stored_address(enrollment_id: EnrollmentId, details: AddressDetails) -> Address {
    Address {
        id: AddressId::new(3),
        enrollment_id,
        details,
        created_at: instant(2024, 1, 1),
        updated_at: instant(2024, 2, 1),
    }
}

fn request(
    user_id: UserId,
    enrollment: EnrollmentDetails,
    address: AddressDetails,
) -> CreateOrUpdateEnrollmentRequest {
    CreateOrUpdateEnrollmentRequest {
        user_id,
        enrollment,
        address,
    }
}

#[rstest]
#[tokio::test]
async fn fetch_strips_bookkeeping_from_enrollment_and_address(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    address_details: AddressDetails,
) {
    let enrollment = stored_enrollment(user_id, enrollment_details.clone());
    let address = stored_address(enrollment.id, address_details.clone());
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_find_with_address_by_user_id()
        .withf(move |id| *id == user_id)
        .times(1)
        .return_once(move |_| {
            Ok(Some(EnrollmentRecord {
                enrollment,
                address: Some(address),
            }))
        });

    let service = make_service(
        enrollments,
        MockAddressRepository::new(),
        MockPostalCodeLookup::new(),
    );
    let view = service
        .fetch_with_address(&user_id)
        .await
        .expect("enrollment found");

    assert_eq!(view.id, EnrollmentId::new(7));
    assert_eq!(view.details, enrollment_details);
    let summary = view.address.expect("address present");
    assert_eq!(summary.id, AddressId::new(3));
    assert_eq!(summary.details, address_details);
}

#[rstest]
#[tokio::test]
async fn fetch_without_address_leaves_address_empty(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
) {
    let enrollment = stored_enrollment(user_id, enrollment_details);
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_find_with_address_by_user_id()
        .times(1)
        .return_once(move |_| {
            Ok(Some(EnrollmentRecord {
                enrollment,
                address: None,
            }))
        });

    let service = make_service(
        enrollments,
        MockAddressRepository::new(),
        MockPostalCodeLookup::new(),
    );
    let view = service
        .fetch_with_address(&user_id)
        .await
        .expect("enrollment found");
    assert!(view.address.is_none());
}

#[rstest]
#[tokio::test]
async fn fetch_for_unknown_user_is_not_found(user_id: UserId) {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_find_with_address_by_user_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(
        enrollments,
        MockAddressRepository::new(),
        MockPostalCodeLookup::new(),
    );
    let error = service
        .fetch_with_address(&user_id)
        .await
        .expect_err("no enrollment");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case::connection(
    EnrollmentRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case::query(EnrollmentRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn fetch_maps_repository_failures(
    user_id: UserId,
    #[case] failure: EnrollmentRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_find_with_address_by_user_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = make_service(
        enrollments,
        MockAddressRepository::new(),
        MockPostalCodeLookup::new(),
    );
    let error = service
        .fetch_with_address(&user_id)
        .await
        .expect_err("repository failed");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn create_or_update_validates_then_upserts_in_order(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    address_details: AddressDetails,
) {
    let mut sequence = Sequence::new();
    let mut postal_codes = MockPostalCodeLookup::new();
    let mut enrollments = MockEnrollmentRepository::new();
    let mut addresses = MockAddressRepository::new();

    postal_codes
        .expect_lookup()
        .withf(|cep| cep == "01001000")
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(PostalAddress::default()));

    let expected_enrollment = enrollment_details.clone();
    enrollments
        .expect_upsert()
        .withf(move |id, details| *id == user_id && *details == expected_enrollment)
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|id, details| Ok(stored_enrollment(*id, details.clone())));

    let expected_address = address_details.clone();
    addresses
        .expect_upsert()
        .withf(move |enrollment_id, details| {
            *enrollment_id == EnrollmentId::new(7) && *details == expected_address
        })
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|enrollment_id, details| Ok(stored_address(enrollment_id, details.clone())));

    let service = make_service(enrollments, addresses, postal_codes);
    service
        .create_or_update(request(user_id, enrollment_details, address_details))
        .await
        .expect("write succeeds");
}

#[rstest]
#[tokio::test]
async fn create_or_update_passes_empty_detail_through(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    mut address_details: AddressDetails,
) {
    address_details.address_detail = Some(String::new());
    let mut postal_codes = MockPostalCodeLookup::new();
    let mut enrollments = MockEnrollmentRepository::new();
    let mut addresses = MockAddressRepository::new();

    postal_codes
        .expect_lookup()
        .return_once(|_| Ok(PostalAddress::default()));
    enrollments
        .expect_upsert()
        .return_once(|id, details| Ok(stored_enrollment(*id, details.clone())));
    addresses
        .expect_upsert()
        .withf(|_, details| details.address_detail.as_deref() == Some(""))
        .times(1)
        .return_once(|enrollment_id, details| Ok(stored_address(enrollment_id, details.clone())));

    let service = make_service(enrollments, addresses, postal_codes);
    service
        .create_or_update(request(user_id, enrollment_details, address_details))
        .await
        .expect("write succeeds");
}

#[rstest]
#[case::flagged(PostalCodeLookupError::no_content("99999999"))]
#[case::empty(PostalCodeLookupError::not_found("99999999"))]
#[case::timeout(PostalCodeLookupError::timeout("5s elapsed"))]
#[tokio::test]
async fn rejected_postal_code_writes_nothing(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    address_details: AddressDetails,
    #[case] failure: PostalCodeLookupError,
) {
    let mut postal_codes = MockPostalCodeLookup::new();
    let mut enrollments = MockEnrollmentRepository::new();
    let mut addresses = MockAddressRepository::new();

    postal_codes
        .expect_lookup()
        .times(1)
        .return_once(move |_| Err(failure));
    enrollments.expect_upsert().times(0);
    addresses.expect_upsert().times(0);

    let service = make_service(enrollments, addresses, postal_codes);
    let error = service
        .create_or_update(request(user_id, enrollment_details, address_details))
        .await
        .expect_err("postal code rejected");

    assert_eq!(error.code(), ErrorCode::InvalidData);
    assert_eq!(error.invalid_data_messages(), vec![INVALID_BODY_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn enrollment_failure_skips_address_write(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    address_details: AddressDetails,
) {
    let mut postal_codes = MockPostalCodeLookup::new();
    let mut enrollments = MockEnrollmentRepository::new();
    let mut addresses = MockAddressRepository::new();

    postal_codes
        .expect_lookup()
        .return_once(|_| Ok(PostalAddress::default()));
    enrollments
        .expect_upsert()
        .times(1)
        .return_once(|_, _| Err(EnrollmentRepositoryError::connection("pool exhausted")));
    addresses.expect_upsert().times(0);

    let service = make_service(enrollments, addresses, postal_codes);
    let error = service
        .create_or_update(request(user_id, enrollment_details, address_details))
        .await
        .expect_err("enrollment write failed");
    assert_eq!(error.code(), ErrorCode::InvalidData);
}

#[rstest]
#[tokio::test]
async fn address_failure_after_enrollment_write_is_invalid_data(
    user_id: UserId,
    enrollment_details: EnrollmentDetails,
    address_details: AddressDetails,
) {
    let mut postal_codes = MockPostalCodeLookup::new();
    let mut enrollments = MockEnrollmentRepository::new();
    let mut addresses = MockAddressRepository::new();

    postal_codes
        .expect_lookup()
        .return_once(|_| Ok(PostalAddress::default()));
    enrollments
        .expect_upsert()
        .times(1)
        .return_once(|id, details| Ok(stored_enrollment(*id, details.clone())));
    addresses
        .expect_upsert()
        .times(1)
        .return_once(|_, _| Err(AddressRepositoryError::query("check constraint")));

    let service = make_service(enrollments, addresses, postal_codes);
    let error = service
        .create_or_update(request(user_id, enrollment_details, address_details))
        .await
        .expect_err("address write failed");

    assert_eq!(error.code(), ErrorCode::InvalidData);
    assert_eq!(error.invalid_data_messages(), vec![INVALID_BODY_MESSAGE]);
}
