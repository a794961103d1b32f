use chrono::NaiveDate;
use salesdb_core::db::open_db_in_memory;
use salesdb_core::{
    DaoFactory, Department, DepartmentService, RepoError, Seller, SellerService,
};

#[test]
fn department_save_or_update_inserts_then_updates() {
    let conn = open_db_in_memory().unwrap();
    let service = DepartmentService::new(DaoFactory::new(&conn).department_dao().unwrap());

    let mut department = Department::new("D1");
    let id = service.save_or_update(&mut department).unwrap();
    assert_eq!(department.id, Some(id));

    department.name = "Food".to_string();
    assert_eq!(service.save_or_update(&mut department).unwrap(), id);

    let all = service.find_all().unwrap();
    assert_eq!(all, vec![Department::with_id(id, "Food")]);
}

#[test]
fn department_remove_requires_id_and_respects_references() {
    let conn = open_db_in_memory().unwrap();
    let factory = DaoFactory::new(&conn);
    let departments = DepartmentService::new(factory.department_dao().unwrap());
    let sellers = SellerService::new(factory.seller_dao().unwrap());

    assert!(matches!(
        departments.remove(&Department::new("Unsaved")).unwrap_err(),
        RepoError::MissingId("department")
    ));

    let mut department = Department::new("Computers");
    departments.save_or_update(&mut department).unwrap();
    let mut seller = Seller::new(
        "Alex Grey",
        "alex@gmail.com",
        NaiveDate::from_ymd_opt(1987, 12, 1).unwrap(),
        2000.0,
        department.clone(),
    );
    sellers.save_or_update(&mut seller).unwrap();

    assert!(matches!(
        departments.remove(&department).unwrap_err(),
        RepoError::Integrity(_)
    ));

    sellers.remove(&seller).unwrap();
    departments.remove(&department).unwrap();
    assert!(departments.find_by_id(department.id.unwrap()).unwrap().is_none());
}

#[test]
fn seller_service_lists_by_department() {
    let conn = open_db_in_memory().unwrap();
    let factory = DaoFactory::new(&conn);
    let departments = DepartmentService::new(factory.department_dao().unwrap());
    let sellers = SellerService::new(factory.seller_dao().unwrap());

    let mut books = Department::new("Books");
    departments.save_or_update(&mut books).unwrap();

    let mut seller = Seller::new(
        "Maria Brown",
        "maria@gmail.com",
        NaiveDate::from_ymd_opt(1979, 5, 2).unwrap(),
        3000.0,
        books.clone(),
    );
    let id = sellers.save_or_update(&mut seller).unwrap();

    seller.base_salary = 3100.0;
    assert_eq!(sellers.save_or_update(&mut seller).unwrap(), id);

    let listed = sellers.find_by_department(&books).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].base_salary, 3100.0);
    assert_eq!(sellers.find_all().unwrap(), listed);
    assert_eq!(sellers.find_by_id(id).unwrap().as_ref(), listed.first());
}
